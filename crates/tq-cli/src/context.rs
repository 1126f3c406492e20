use anyhow::{Context, bail};
use tq_client::ApiClient;
use tq_config::TqConfig;
use tq_core::Metamodel;
use tq_db::TqDb;
use tq_schema::NamingVocabulary;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TqConfig,
    pub db: TqDb,
    pub vocabulary: NamingVocabulary,
    pub client: ApiClient,
}

impl AppContext {
    /// Load configuration, apply flag overrides and open the store.
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config =
            TqConfig::load_with_dotenv().context("failed to load transitq configuration")?;
        if let Some(db) = &flags.db {
            config.store.db_path.clone_from(db);
        }
        Self::from_config(config).await
    }

    pub async fn from_config(config: TqConfig) -> anyhow::Result<Self> {
        let db = TqDb::open_local(&config.store.db_path)
            .await
            .with_context(|| format!("failed to open metamodel store at {}", config.store.db_path))?;
        let vocabulary = NamingVocabulary::new(
            config.naming.synonyms.clone(),
            config.naming.qualifiers.clone(),
        );
        let client = ApiClient::new(&config.api).context("failed to build HTTP client")?;
        Ok(Self {
            config,
            db,
            vocabulary,
            client,
        })
    }

    /// The stored metamodel; fails when `tq init` has not run yet.
    pub async fn metamodel(&self) -> anyhow::Result<Metamodel> {
        let model = self.db.load_metamodel().await?;
        if model.resource_types.is_empty() {
            bail!("metamodel is empty. Run 'tq init' first.");
        }
        Ok(model)
    }
}
