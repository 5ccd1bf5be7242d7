use super::Collection;
use crate::model::{Dialog, DialogFrame};

impl Collection<Dialog> {
    /// 특정 화자의 대사를 모든 대화에서 모읍니다 (대소문자 무시)
    pub fn frames_by_speaker<'a>(&'a self, speaker: &'a str) -> impl Iterator<Item = &'a DialogFrame> + 'a {
        self.iter()
            .flat_map(|dialog| dialog.frames.iter())
            .filter(move |frame| frame.speaker.eq_ignore_ascii_case(speaker))
    }
}
