use std::collections::BTreeMap;

use anyhow::{Context, Result};
use futures::future::{FutureExt, LocalBoxFuture};

use dataset::{
    parse_json, DataLayout, DayCategory, Resource, StopDirectory, StopPayload, StopStats,
    TravelTimes,
};

/// Retrieves the raw bytes of a dataset resource.
pub trait Fetcher {
    fn get<'a>(&'a self, resource: &'a Resource) -> LocalBoxFuture<'a, Result<Vec<u8>>>;
}

/// Fetches from a static file server.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self, resource: &Resource) -> String {
        format!("{}/{}", self.base_url, resource.url_path())
    }
}

impl Fetcher for HttpFetcher {
    fn get<'a>(&'a self, resource: &'a Resource) -> LocalBoxFuture<'a, Result<Vec<u8>>> {
        async move {
            let url = self.url(resource);
            debug!("Fetching {url}");
            let resp = self
                .client
                .get(&url)
                .send()
                .await
                .with_context(|| format!("requesting {url}"))?;
            if !resp.status().is_success() {
                bail!("{url} returned {}", resp.status());
            }
            let bytes = resp
                .bytes()
                .await
                .with_context(|| format!("reading {url}"))?;
            Ok(bytes.to_vec())
        }
        .boxed_local()
    }
}

// Natively, every load runs on its own short-lived runtime, and pooled connections die with it
#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::new())
}

/// Reads a dataset exported to a local directory.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
pub struct DirFetcher {
    root: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirFetcher {
    pub fn new<P: Into<std::path::PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Fetcher for DirFetcher {
    fn get<'a>(&'a self, resource: &'a Resource) -> LocalBoxFuture<'a, Result<Vec<u8>>> {
        let path = self.root.join(resource.file_path());
        async move { Ok(fs_err::read(path)?) }.boxed_local()
    }
}

/// Any of the supported fetchers, chosen at startup.
#[derive(Clone)]
pub enum DataSource {
    Http(HttpFetcher),
    #[cfg(not(target_arch = "wasm32"))]
    Dir(DirFetcher),
}

impl Fetcher for DataSource {
    fn get<'a>(&'a self, resource: &'a Resource) -> LocalBoxFuture<'a, Result<Vec<u8>>> {
        match self {
            DataSource::Http(x) => x.get(resource),
            #[cfg(not(target_arch = "wasm32"))]
            DataSource::Dir(x) => x.get(resource),
        }
    }
}

pub async fn load_directory<F: Fetcher + ?Sized>(fetcher: &F) -> Result<StopDirectory> {
    let bytes = fetcher.get(&Resource::directory()).await?;
    let directory = StopDirectory::parse(&bytes)?;
    info!("Stop directory has {} stops", directory.len());
    Ok(directory)
}

/// Fetches every resource for one stop concurrently. If any of them fails, so does the whole
/// load; partial results are never returned.
pub async fn load_stop<F: Fetcher + ?Sized>(
    fetcher: &F,
    layout: DataLayout,
    stop_name: &str,
) -> Result<StopPayload> {
    match layout {
        DataLayout::Merged => {
            let bytes = fetcher.get(&Resource::merged(stop_name)).await?;
            StopPayload::parse_merged(&bytes)
        }
        DataLayout::Split => {
            let werktag = Resource::travel_times(DayCategory::Werktag, stop_name);
            let samstag = Resource::travel_times(DayCategory::Samstag, stop_name);
            let sonntag = Resource::travel_times(DayCategory::Sonntag, stop_name);
            let stats = Resource::stats(stop_name);
            let (werktag, samstag, sonntag, stats) = futures::try_join!(
                fetcher.get(&werktag),
                fetcher.get(&samstag),
                fetcher.get(&sonntag),
                fetcher.get(&stats),
            )?;

            let mut travel_times = BTreeMap::new();
            for (day, bytes) in [
                (DayCategory::Werktag, werktag),
                (DayCategory::Samstag, samstag),
                (DayCategory::Sonntag, sonntag),
            ] {
                let parsed: TravelTimes =
                    parse_json(&bytes, &format!("{day} travel times for {stop_name}"))?;
                travel_times.insert(day, parsed);
            }
            let stats: StopStats = parse_json(&stats, &format!("stats for {stop_name}"))?;
            StopPayload::new(travel_times, stats)
        }
    }
}
