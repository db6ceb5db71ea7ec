//! # alm-service
//!
//! Orchestration for Almanac: template lookup and display-name resolution,
//! research lifecycle, and entry lifecycle with template validation.
//!
//! Services check requests and existence, resolve names against the
//! research's template, and only then hand work to the storage driver.
//! Storage failures surface as [`ServiceError::Domain`] with the original
//! error kept as the source.

pub mod entry;
pub mod error;
pub mod research;
pub mod template;

use std::sync::Arc;

use alm_config::AlmanacConfig;
use alm_store::{
    FileEntryRepository, FileResearchRepository, FileStorageDriver, FileTemplateRepository,
    StorageDriver,
};

pub use entry::EntryService;
pub use error::ServiceError;
pub use research::ResearchService;
pub use template::TemplateService;

/// The wired service stack over one storage root.
#[derive(Clone)]
pub struct Almanac {
    templates: TemplateService,
    researches: ResearchService,
    entries: EntryService,
}

impl Almanac {
    /// Build repositories, driver, and services from `config`.
    ///
    /// Directories are not created here; the research directory appears on
    /// the first write.
    ///
    /// # Errors
    ///
    /// `Config` if the configuration is invalid, `UnsupportedDriver` if the
    /// configured driver is not handled by the file driver.
    pub fn open(config: &AlmanacConfig) -> Result<Self, ServiceError> {
        let storage = &config.storage;
        storage.validate()?;

        let templates_dir = storage.templates_dir();
        let researches_dir = storage.researches_dir();

        let template_repo = Arc::new(FileTemplateRepository::new(&templates_dir));
        let research_repo = Arc::new(FileResearchRepository::new(&researches_dir));
        let entry_repo = Arc::new(FileEntryRepository::new(&researches_dir));

        let driver = FileStorageDriver::new(
            storage.default_entry_status.as_str(),
            research_repo.clone(),
            entry_repo.clone(),
        );
        if !driver.supports(&storage.driver) {
            tracing::error!(driver = %storage.driver, "unsupported storage driver");
            return Err(ServiceError::UnsupportedDriver(storage.driver.clone()));
        }
        let driver: Arc<dyn StorageDriver> = Arc::new(driver);

        let templates = TemplateService::new(template_repo);
        let researches =
            ResearchService::new(research_repo.clone(), templates.clone(), driver.clone());
        let entries = EntryService::new(entry_repo, research_repo, templates.clone(), driver);

        tracing::info!(
            templates = %templates_dir.display(),
            researches = %researches_dir.display(),
            driver = %storage.driver,
            "almanac opened"
        );
        Ok(Self {
            templates,
            researches,
            entries,
        })
    }

    #[must_use]
    pub const fn templates(&self) -> &TemplateService {
        &self.templates
    }

    #[must_use]
    pub const fn researches(&self) -> &ResearchService {
        &self.researches
    }

    #[must_use]
    pub const fn entries(&self) -> &EntryService {
        &self.entries
    }
}
