use std::path::{Path, PathBuf};

use crate::circuits::InputError;
use crate::config::{Config, ConfigError};
use crate::history::{CsvHistoryStore, HistoryError};
use crate::i18n::{self, Translator};
use crate::reports::{record_report, Report};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 이력 파일 오류
    #[error("history error: {0}")]
    History(#[from] HistoryError),
    /// 입력값 검증 실패
    #[error("{0}")]
    Input(#[from] InputError),
}

/// 한 번의 실행 동안 유지되는 설정/번역기/이력 옵션.
///
/// `history_override`와 `no_save`는 명령행에서만 오며 설정 파일에 저장하지 않는다.
/// 이력 저장소는 세션당 하나이며 경로가 바뀔 때만 다시 만든다.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub translator: Translator,
    pub no_save: bool,
    history_override: Option<PathBuf>,
    store: CsvHistoryStore,
}

impl Session {
    pub fn new(config: Config, translator: Translator) -> Self {
        let store = CsvHistoryStore::new(&config.history_path);
        Self {
            config,
            translator,
            no_save: false,
            history_override: None,
            store,
        }
    }

    pub fn history_path(&self) -> &Path {
        self.history_override
            .as_deref()
            .unwrap_or(&self.config.history_path)
    }

    pub fn set_history_override(&mut self, path: Option<PathBuf>) {
        self.history_override = path;
        self.sync_store();
    }

    pub fn store(&self) -> &CsvHistoryStore {
        &self.store
    }

    /// 설정 변경 후 이력 경로가 달라졌으면 저장소를 교체한다.
    pub fn sync_store(&mut self) {
        if self.store.path() != self.history_path() {
            tracing::debug!(path = %self.history_path().display(), "switching history store");
            self.store = CsvHistoryStore::new(self.history_path());
        }
    }

    pub fn saves_history(&self) -> bool {
        self.config.save_history && !self.no_save
    }

    /// 이력 저장이 켜져 있으면 보고서를 추가하고 누적 건수를 반환한다.
    pub fn persist(&self, report: &dyn Report) -> Result<Option<usize>, HistoryError> {
        if !self.saves_history() {
            return Ok(None);
        }
        record_report(&self.store, report).map(Some)
    }

    /// 설정의 언어 값으로 번역기를 다시 만든다.
    pub fn reload_translator(&mut self) {
        let lang = i18n::resolve_language(&self.config.language, None);
        self.translator = Translator::new_with_pack(&lang, self.config.locale_dir.as_deref());
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&session.translator)? {
            MenuChoice::Dc => ui_cli::handle_dc(session)?,
            MenuChoice::Ac => ui_cli::handle_ac(session)?,
            MenuChoice::CapacitorDc => ui_cli::handle_capacitor_dc(session)?,
            MenuChoice::CapacitorAc => ui_cli::handle_capacitor_ac(session)?,
            MenuChoice::ThreePhase => ui_cli::handle_three_phase(session)?,
            MenuChoice::History => ui_cli::print_history(session, &[])?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.sync_store();
                session.config.save()?;
                session.reload_translator();
                println!("{}", session.translator.t(i18n::keys::SETTINGS_SAVED));
            }
            MenuChoice::Exit => {
                session.config.save()?;
                println!("{}", session.translator.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryStore;
    use crate::reports::{DcInput, DcReport};

    fn session_at(dir: &Path) -> Session {
        let config = Config {
            history_path: dir.join("history.csv"),
            ..Config::default()
        };
        Session::new(config, Translator::new("en"))
    }

    #[test]
    fn override_path_wins_over_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path());
        assert_eq!(session.history_path(), dir.path().join("history.csv"));
        session.set_history_override(Some(dir.path().join("other.csv")));
        assert_eq!(session.history_path(), dir.path().join("other.csv"));
        assert_eq!(session.store().path(), dir.path().join("other.csv"));
    }

    #[test]
    fn store_is_kept_until_path_changes() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path());
        let first: *const CsvHistoryStore = session.store();
        session.sync_store();
        assert!(std::ptr::eq(first, session.store()));
        assert_eq!(session.store().path(), dir.path().join("history.csv"));

        session.config.history_path = dir.path().join("moved.csv");
        session.sync_store();
        assert_eq!(session.store().path(), dir.path().join("moved.csv"));

        let report = DcReport::run(DcInput {
            voltage: 12.0,
            current: 3.0,
            hours: 0.0,
        })
        .unwrap();
        assert_eq!(session.persist(&report).unwrap(), Some(1));
        assert!(dir.path().join("moved.csv").exists());
        assert!(!dir.path().join("history.csv").exists());
    }

    #[test]
    fn persist_respects_no_save() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_at(dir.path());
        let report = DcReport::run(DcInput {
            voltage: 10.0,
            current: 2.0,
            hours: 1.0,
        })
        .unwrap();

        assert_eq!(session.persist(&report).unwrap(), Some(1));
        session.no_save = true;
        assert_eq!(session.persist(&report).unwrap(), None);
        assert_eq!(session.store().load().unwrap().len(), 1);
    }
}
