use std::sync::Arc;

use crossing_api::{
    ApiId, BoxedValue, ContextId, ConversionError, ErrorKind, InternalContext, ServiceCommand,
    ServiceContext, Value,
};
use crossing_engine::{CommandSchema, SchemaCodec, Translator};
use proptest::prelude::*;

fn translator() -> Translator {
    let codec = SchemaCodec::new([
        CommandSchema::new("glDrawArrays", ApiId(1), ["mode", "first", "count"]),
        CommandSchema::new("glGetError", ApiId(1), Vec::<String>::new()).returning(),
    ])
    .unwrap();
    Translator::new(Arc::new(codec))
}

/// Plain data values, nested a few levels deep. Floats include NaN and the
/// infinities.
fn data_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int64),
        any::<u64>().prop_map(Value::UInt64),
        any::<f64>().prop_map(Value::Float64),
        Just(Value::Float64(f64::NAN)),
        ".{0,16}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Value::Map),
        ]
    })
}

fn service_context() -> impl Strategy<Value = ServiceContext> {
    (".{0,12}", any::<u32>()).prop_map(|(name, api)| ServiceContext::new(name, ApiId(api)))
}

fn internal_context() -> impl Strategy<Value = InternalContext> {
    (any::<u64>(), ".{0,24}", any::<u32>(), any::<u64>(), any::<u32>()).prop_map(
        |(id, name, api, thread, priority)| InternalContext {
            id: ContextId(id),
            name,
            api: ApiId(api),
            thread,
            priority,
        },
    )
}

/// Anything the translator may be handed on the way out that is neither an
/// atom nor an internal context.
fn non_internal_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        data_value(),
        data_value().prop_map(|v| Value::Boxed(BoxedValue::new(v))),
        service_context().prop_map(Value::Context),
        "[a-zA-Z]{1,12}".prop_map(|n| Value::Command(ServiceCommand::new(n))),
        any::<u64>().prop_map(Value::opaque),
    ]
}

/// Anything the translator may be handed on the way in that is neither a
/// command nor a boxed value.
fn non_service_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        data_value(),
        internal_context().prop_map(Value::InternalContext),
        service_context().prop_map(Value::Context),
        any::<u64>().prop_map(Value::opaque),
    ]
}

proptest! {
    #[test]
    fn context_projection_keeps_name_and_api(ctx in internal_context()) {
        let out = translator().internal_to_service(Value::InternalContext(ctx.clone()));
        prop_assert_eq!(out, Ok(Value::Context(ServiceContext::new(ctx.name, ctx.api))));
    }

    #[test]
    fn context_projection_does_not_come_back(ctx in internal_context()) {
        let t = translator();
        let service = t.internal_to_service(Value::InternalContext(ctx.clone())).unwrap();
        let back = t.service_to_internal(service.clone()).unwrap();
        prop_assert_eq!(&back, &service);
        prop_assert_ne!(back, Value::InternalContext(ctx));
    }

    #[test]
    fn to_service_is_identity_for_other_values(v in non_internal_value()) {
        prop_assert_eq!(translator().internal_to_service(v.clone()), Ok(v));
    }

    #[test]
    fn to_internal_is_identity_for_other_values(v in non_service_value()) {
        prop_assert_eq!(translator().service_to_internal(v.clone()), Ok(v));
    }

    #[test]
    fn boxed_value_unwraps_to_its_payload(payload in non_internal_value()) {
        let boxed = Value::Boxed(BoxedValue::new(payload.clone()));
        prop_assert_eq!(translator().service_to_internal(boxed), Ok(payload));
    }

    #[test]
    fn codec_errors_reach_the_caller_unchanged(name in "[a-z]{1,8}Bogus") {
        let t = translator();
        let err = t
            .service_to_internal(Value::Command(ServiceCommand::new(name.clone())))
            .unwrap_err();
        prop_assert_eq!(err, ConversionError::new(
            ErrorKind::UnknownCommand,
            format!("unknown command '{name}'"),
        ));
    }

    #[test]
    fn commands_survive_a_round_trip(
        mode in any::<i64>(),
        first in any::<i64>(),
        count in any::<i64>(),
        thread in any::<u64>(),
    ) {
        let t = translator();
        let cmd = ServiceCommand::new("glDrawArrays")
            .with_api(ApiId(1))
            .with_thread(thread)
            .with_parameter("mode", mode)
            .with_parameter("first", first)
            .with_parameter("count", count);
        let atom = t.service_to_internal(Value::Command(cmd.clone())).unwrap();
        prop_assert_eq!(atom.category(), crossing_api::Category::Atom);
        prop_assert_eq!(t.internal_to_service(atom), Ok(Value::Command(cmd)));
    }
}

#[test]
fn concrete_scenarios() {
    let t = translator();

    let ctx = InternalContext {
        id: ContextId(1),
        name: "main".into(),
        api: ApiId(7),
        thread: 0,
        priority: 0,
    };
    assert_eq!(
        t.internal_to_service(Value::InternalContext(ctx)),
        Ok(Value::Context(ServiceContext::new("main", ApiId(7))))
    );
    assert_eq!(
        t.service_to_internal(Value::Boxed(BoxedValue::new(42i64))),
        Ok(Value::Int64(42))
    );
    assert_eq!(t.internal_to_service(Value::Int64(42)), Ok(Value::Int64(42)));
}
