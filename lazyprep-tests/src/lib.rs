#[cfg(not(feature = "disable-anonymous"))]
mod anonymous;
#[cfg(not(feature = "disable-binary"))]
mod binary;
mod errors;
mod find;
mod nul_bytes;
mod types;
#[cfg(not(feature = "disable-unprepare"))]
mod unprepare;

#[cfg(not(feature = "disable-anonymous"))]
use crate::anonymous::anonymous;
#[cfg(not(feature = "disable-binary"))]
use crate::binary::binary;
#[cfg(not(feature = "disable-unprepare"))]
use crate::unprepare::unprepare;
use crate::{
    errors::{duplicate, prepare_failure, unknown},
    find::find,
    nul_bytes::nul_bytes,
    types::types,
};
use lazyprep::{Connection, Session};
use log::LevelFilter;
use std::env;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<C: Connection>(connection: C) {
    let mut session = Session::new(connection);
    find(&mut session).await;
    nul_bytes(&mut session).await;
    types(&mut session).await;
    unknown(&mut session).await;
    duplicate(&mut session).await;
    prepare_failure(&mut session).await;
    #[cfg(not(feature = "disable-anonymous"))]
    anonymous(&mut session).await;
    #[cfg(not(feature = "disable-binary"))]
    binary(&mut session).await;
    #[cfg(not(feature = "disable-unprepare"))]
    unprepare(&mut session).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
