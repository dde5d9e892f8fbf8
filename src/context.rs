//! Application context shared by all handlers
//!
//! Registered once in the dispatcher dependencies and passed to every
//! handler, so tests can build one around a temporary command file.

use crate::config::Settings;
use crate::middleware::{AuthMiddleware, LoggingMiddleware};
use crate::services::MarketplaceService;
use crate::state::StateTracker;
use crate::storage::CommandRepository;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub commands: CommandRepository,
    pub states: StateTracker,
    pub marketplace: MarketplaceService,
    pub auth: AuthMiddleware,
    pub logging: LoggingMiddleware,
}

impl AppContext {
    /// Build the context from settings, loading the command file
    pub fn new(settings: Settings) -> Result<Self> {
        let commands = CommandRepository::open(&settings.auto_response.path)?;
        let states = StateTracker::new(settings.state.ttl());
        Self::with_parts(settings, commands, states)
    }

    /// Build the context around an existing repository and tracker
    pub fn with_parts(
        settings: Settings,
        commands: CommandRepository,
        states: StateTracker,
    ) -> Result<Self> {
        Ok(Self {
            marketplace: MarketplaceService::new(&settings.marketplace)?,
            auth: AuthMiddleware::new(&settings.bot),
            logging: LoggingMiddleware::default(),
            settings,
            commands,
            states,
        })
    }

    /// Number of commands per page of the command list
    pub fn page_size(&self) -> usize {
        self.settings.auto_response.page_size
    }
}
