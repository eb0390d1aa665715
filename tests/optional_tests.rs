#![cfg(feature = "monad")]
//! Integration tests for `Optional`.

use rstest::rstest;
use traverso::monad::{Monad, Optional, optional};
use traverso::traversable;
use traverso::value::{Collection, Value};

#[derive(Debug, PartialEq)]
enum LookupError {
    Missing(&'static str),
}

fn lookup(name: &'static str) -> Result<Value, LookupError> {
    let settings = traversable!["port" => 8080, "host" => Value::Null];
    Optional::from(settings.get(&name.into()).cloned()).or_else_throw(|| LookupError::Missing(name))
}

#[rstest]
fn present_values_flow_through() {
    let doubled = optional(21).if_present(|value| Value::Int(value.as_i64().unwrap_or(0) * 2));
    assert!(doubled.is_present());
    assert_eq!(doubled.or_else(0), Value::Int(42));
}

#[rstest]
fn absence_absorbs_every_step() {
    let mut calls = 0;
    let result = Optional::empty()
        .if_present(|value| {
            calls += 1;
            value
        })
        .filter(|_| {
            calls += 1;
            true
        });
    assert!(result.is_same(&Optional::empty()));
    assert_eq!(calls, 0);
}

#[rstest]
#[case(Value::from(4), true)]
#[case(Value::from(3), false)]
fn filter_keeps_or_drops(#[case] input: Value, #[case] kept: bool) {
    let filtered = Optional::of(input).filter(|value| value.as_i64().is_some_and(|number| number % 2 == 0));
    assert_eq!(filtered.is_present(), kept);
}

#[rstest]
fn or_else_throw_returns_the_callers_error() {
    assert_eq!(lookup("port"), Ok(Value::Int(8080)));
    assert_eq!(lookup("host"), Err(LookupError::Missing("host")));
    assert_eq!(lookup("user"), Err(LookupError::Missing("user")));
}

#[rstest]
fn crossing_into_stream_normalizes() {
    let collection = Collection::new(traversable!["a" => 1]).into_value();
    assert_eq!(Optional::of(collection).stream().to_array(), traversable!["a" => 1]);
    assert_eq!(Optional::of("x").stream().count(), 1);
}

#[rstest]
fn crossing_into_chain_navigates() {
    let user = Optional::of(traversable!["name" => "Ada"]);
    assert_eq!(user.chain().get_key("name").result(), Optional::of("Ada"));
}

#[rstest]
fn map_of_the_trait_rebuilds_through_create() {
    let mapped = Optional::of(1).map(|_| Value::Null);
    assert!(mapped.is_same(&Optional::empty()));
    assert_eq!(Optional::of(1).get(), &Value::Int(1));
}
