//! 병합된 설정과 토큰 해석 상태를 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 설정 점검 결과를 pretty JSON 문자열로 반환한다(토큰 값은 포함하지 않는다).
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
