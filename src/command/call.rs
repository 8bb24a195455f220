use std::sync::Arc;

use anyhow::Result;
use sessioncache::SessionCache;

use crate::argsets::CallArgs;
use crate::data_mgmt::models::ActionRequest;
use crate::proxy_mgmt::config::Config;
use crate::proxy_mgmt::Dispatcher;

pub fn call(args: CallArgs) -> Result<()> {
    let config = Config::from_env()?;
    let dispatcher = Dispatcher::new(&config, Arc::new(SessionCache::new()));

    let value = dispatcher.dispatch(&ActionRequest::new(args.action, args.device_id))?;
    println!("{value}");
    Ok(())
}
