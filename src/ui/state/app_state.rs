use std::sync::Arc;

use dioxus::prelude::{use_hook, use_signal, Signal};

use fleet_console::config::ClientConfig;
use fleet_console::domain::entities::unit::{Unit, UnitDraft, UnitId};
use fleet_console::infra::http::client::HttpUnitSource;
use fleet_console::usecase::ports::unit_source::UnitSource;
use fleet_console::usecase::services::table_engine::TableEngine;
use fleet_console::usecase::services::unit_commands::UnitCommandService;
use fleet_console::usecase::services::unit_store::UnitStore;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Create,
    Edit(UnitId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub mode: EditorMode,
    pub draft: UnitDraft,
}

impl EditorState {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: UnitDraft::default(),
        }
    }

    pub fn edit(unit: &Unit) -> Self {
        Self {
            mode: EditorMode::Edit(unit.id.clone()),
            draft: UnitDraft::from(unit),
        }
    }
}

pub struct AppState {
    pub store: Signal<UnitStore>,
    pub engine: Signal<TableEngine>,
    pub commands: Signal<Arc<UnitCommandService>>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
    pub show_filters: Signal<bool>,
    pub editor: Signal<Option<EditorState>>,
    pub details: Signal<Option<Unit>>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        let api_base_url = config.api_base_url.clone();
        let page_size = config.page_size;
        let source: Arc<dyn UnitSource> =
            use_hook(move || Arc::new(HttpUnitSource::new(&api_base_url)) as Arc<dyn UnitSource>);
        let store_source = source.clone();

        Self {
            store: use_signal(move || UnitStore::new(store_source)),
            engine: use_signal(move || TableEngine::with_page_size(page_size)),
            commands: use_signal(move || Arc::new(UnitCommandService::new(source))),
            busy: use_signal(|| false),
            status: use_signal(|| "Ready".to_string()),
            show_filters: use_signal(|| false),
            editor: use_signal(|| None::<EditorState>),
            details: use_signal(|| None::<Unit>),
        }
    }
}
