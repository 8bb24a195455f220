use std::sync::Arc;

use anyhow::Result;
use sessioncache::SessionCache;

use crate::constants::envvars;
use crate::interfaces::gateway;
use crate::proxy_mgmt::config::Config;
use crate::proxy_mgmt::Dispatcher;

pub fn serve() -> Result<()> {
    let config = Config::from_env()?;
    log::info!("Proxying requests to {}", config.host);
    if config.credentials.is_none() {
        log::warn!(
            "{} or {} not set; action requests will fail until configured",
            envvars::TB_USER,
            envvars::TB_PASS
        );
    }

    // One cache for the lifetime of the process, shared by all requests
    let cache = Arc::new(SessionCache::new());
    let dispatcher = Arc::new(Dispatcher::new(&config, cache));

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(gateway::serve(config.bind_addr, dispatcher))
}
