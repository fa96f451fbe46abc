use crate::config::Config;
use crate::dashboard::DashboardContext;
use crate::external::External;
use crate::preferences::PreferenceStore;
use crate::random::RandomSource;

pub struct AppState {
    pub config: Config,
    pub ext: External,
    pub dashboard: DashboardContext,
    pub preferences: PreferenceStore,
    pub random: RandomSource,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            ext: External::from_config(&config),
            dashboard: DashboardContext::new(),
            preferences: PreferenceStore::new(&config.preferences_path),
            random: RandomSource::new(config.random_seed),
            config,
        }
    }
}
