use crate::{
    core::RepoRef,
    dump,
    index::{ApiLoader, GitOps},
    prow::{Config, PluginConfig},
    Generator,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[clap(
    name = "scheduler-controller",
    about = "Generates Prow configuration from pipeline schedulers"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "scheduler_controller=info,warn",
        env = "SCHEDULER_CONTROLLER_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain")]
    log_format: kubert::LogFormat,

    #[clap(flatten)]
    client: kubert::ClientArgs,

    /// Namespace holding the scheduler resources.
    #[clap(long, short = 'n', default_value = "jx")]
    namespace: String,

    /// Scheduler applied to every repository before any group or repository scheduler.
    ///
    /// An empty value disables the team layer.
    #[clap(long, default_value = "default-scheduler")]
    team_scheduler: String,

    /// Indicates that the cluster's configuration is managed in a dev environment repository.
    #[clap(long)]
    gitops: bool,

    /// Enables the config-updater plugin for the dev environment repository.
    #[clap(long)]
    auto_apply_config_updater: bool,

    /// Environment resource describing the dev environment repository.
    #[clap(long, default_value = "dev")]
    dev_environment: String,

    /// Git URL of the dev environment repository. Takes precedence over the environment
    /// resource.
    #[clap(long)]
    dev_environment_url: Option<String>,

    /// Writes `<prefix>Config.yaml` and `<prefix>Plugins.yaml` instead of printing the
    /// configuration.
    #[clap(long)]
    dump_prefix: Option<String>,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            client,
            namespace,
            team_scheduler,
            gitops,
            auto_apply_config_updater,
            dev_environment,
            dev_environment_url,
            dump_prefix,
        } = self;

        log_format.try_init(log_level)?;

        let client = client.try_client().await?;
        let loader = ApiLoader::new(client);

        let dev_repo = if gitops && auto_apply_config_updater {
            let url = match dev_environment_url {
                Some(url) => Some(url),
                None => loader
                    .environment(&namespace, &dev_environment)
                    .await?
                    .and_then(|env| env.spec.source_url().map(str::to_string)),
            };
            debug!(?url, "Dev environment repository");
            url.as_deref()
                .map(RepoRef::from_git_url)
                .transpose()
                .context("parsing the dev environment repository URL")?
        } else {
            None
        };

        let generator = Generator {
            namespace,
            team_scheduler: Some(team_scheduler),
            gitops: GitOps {
                enabled: gitops,
                auto_apply_config_updater,
                dev_repo,
            },
        };
        let (config, plugins) = generator.generate(&loader).await?;
        info!(
            queries = config.tide.queries.len(),
            plugins = plugins.plugins.len(),
            "Generated prow configuration"
        );

        match dump_prefix {
            Some(prefix) => dump::write(&prefix, &config, &plugins),
            None => print(&config, &plugins)?,
        }
        Ok(())
    }
}

fn print(config: &Config, plugins: &PluginConfig) -> Result<()> {
    let config = serde_yaml::to_string(config).context("serializing prow config")?;
    let plugins = serde_yaml::to_string(plugins).context("serializing prow plugins")?;
    println!("{config}---\n{plugins}");
    Ok(())
}
