use std::sync::Arc;

use crate::application::ports::TextGenerator;
use crate::application::services::{EssayService, MultiSourceAggregator};
use crate::domain::{GroupSwitchPolicy, SheetLayout};
use crate::presentation::config::ScaffoldConfig;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<MultiSourceAggregator>,
    pub essay_service: Arc<EssayService<dyn TextGenerator>>,
    pub sheet_layout: SheetLayout,
    pub group_switch_policy: GroupSwitchPolicy,
    pub scaffold_config: ScaffoldConfig,
}
