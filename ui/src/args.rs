use anyhow::Result;
use structopt::StructOpt;

use dataset::DataLayout;
use model::{DataSource, HttpFetcher};

#[derive(StructOpt)]
pub struct Args {
    /// The base URL of the exported dataset
    #[structopt(long)]
    data_url: Option<String>,
    /// A local directory with the exported dataset. Only works natively.
    #[structopt(long)]
    data_dir: Option<String>,
    /// Fetch one merged file per stop, instead of separate files per day
    #[structopt(long)]
    merged: bool,
    /// Select this stop initially. In the browser, use the URL fragment instead.
    #[structopt(long)]
    pub stop: Option<String>,
    /// Report page views and selections to this collector
    #[structopt(long)]
    pub analytics_url: Option<String>,
}

impl Args {
    pub fn layout(&self) -> DataLayout {
        if self.merged {
            DataLayout::Merged
        } else {
            DataLayout::Split
        }
    }

    pub fn data_source(&self) -> Result<DataSource> {
        if self.data_url.is_some() && self.data_dir.is_some() {
            bail!("You can't specify both --data-url and --data-dir");
        }
        if let Some(ref url) = self.data_url {
            return Ok(DataSource::Http(HttpFetcher::new(url)?));
        }
        self.default_source()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn default_source(&self) -> Result<DataSource> {
        let dir = self.data_dir.clone().unwrap_or_else(|| "data".to_string());
        Ok(DataSource::Dir(model::DirFetcher::new(dir)))
    }

    #[cfg(target_arch = "wasm32")]
    fn default_source(&self) -> Result<DataSource> {
        if self.data_dir.is_some() {
            bail!("--data-dir only works natively; use --data-url");
        }
        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        let origin = window
            .location()
            .origin()
            .map_err(|err| anyhow!("no origin: {err:?}"))?;
        Ok(DataSource::Http(HttpFetcher::new(&format!("{origin}/data"))?))
    }
}
