use crate::MemoryDriver;
use lazyprep_core::{Context, Driver, Error, Result};
use std::{collections::HashSet, env};
use url::Url;
use urlencoding::decode;

/// Behaviour of the simulated server, read from the connection URL.
///
/// `memory://?reject=find,other&strict=true`
///
/// * `reject` (`LAZYPREP_MEMORY_REJECT`): comma separated statement names whose
///   preparation is refused.
/// * `strict` (`LAZYPREP_MEMORY_STRICT`): refuse queries that do not start with a known
///   statement keyword, defaults to `true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryOptions {
    pub reject: HashSet<String>,
    pub strict: bool,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            reject: HashSet::new(),
            strict: true,
        }
    }
}

impl MemoryOptions {
    pub fn from_url(url: &str) -> Result<Self> {
        let context = || format!("While trying to connect to `{}`", url);
        let url = decode(url).with_context(context)?;
        let prefix = format!("{}://", MemoryDriver::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Memory connection url must start with `{}`",
                &prefix
            ))
            .context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut url = Url::parse(&url).with_context(context)?;
        let mut take_url_param = |key: &str, env_var: &str| {
            let mut value = None;
            let mut pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
            if let Some(pos) = pairs.iter().position(|(k, _)| k == key) {
                let (_, v) = pairs.remove(pos);
                value = Some(v);
            }
            url.query_pairs_mut()
                .clear()
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            value.or_else(|| env::var(env_var).ok())
        };
        let reject = take_url_param("reject", "LAZYPREP_MEMORY_REJECT")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(Into::into)
                    .collect()
            })
            .unwrap_or_default();
        let strict = match take_url_param("strict", "LAZYPREP_MEMORY_STRICT").as_deref() {
            None => true,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) => {
                let error = Error::msg(format!(
                    "Parameter `strict` must be `true` or `false`, found `{v}`"
                ))
                .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
        };
        for (key, _) in url.query_pairs() {
            log::warn!("Ignoring unknown memory connection parameter `{key}`");
        }
        Ok(Self { reject, strict })
    }
}
