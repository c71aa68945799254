//! Tier 3: logger adapters

use std::sync::Arc;

use crate::test_utils::{release, user_with_fines, RevokedProxy};
use safelog::{Channel, Fault, HostRef, MemorySink, SafeLogger, Value};

#[test]
fn contract_log_single_prefixed_record() {
    let sink = Arc::new(MemorySink::new());
    let logger = SafeLogger::new(Arc::clone(&sink));
    let user = user_with_fines(2);

    logger.log("prefix:", &Value::Object(user.clone()));

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].channel, Channel::Standard);
    assert!(records[0].line.starts_with("prefix:"));
    release(&user);
}

#[test]
fn contract_log_unserializable_input() {
    let sink = Arc::new(MemorySink::new());
    let logger = SafeLogger::new(Arc::clone(&sink));
    logger.log("prefix:", &Value::Host(HostRef::new(RevokedProxy)));
    assert_eq!(
        sink.lines(Channel::Standard),
        vec!["prefix: [Unserializable Object]"]
    );
}

#[test]
fn contract_error_log_unknown_error_literal() {
    let sink = Arc::new(MemorySink::new());
    let logger = SafeLogger::with_renderer(
        Arc::clone(&sink),
        |_: &Value| -> Result<String, Fault> { Err(Fault::Panicked("serializer".into())) },
    );
    logger.error_log("err:", &Value::Host(HostRef::new(RevokedProxy)));
    assert_eq!(sink.lines(Channel::Error), vec!["err: [Unknown Error]"]);
    assert!(sink.lines(Channel::Standard).is_empty());
}

#[test]
fn contract_free_functions_do_not_panic() {
    safelog::safe_log("stdout:", &Value::Int(1));
    safelog::safe_error_log("stderr:", &Value::Host(HostRef::new(RevokedProxy)));
}
