//! Handler synthesizer.
//!
//! Turns every route rule of an [`InterfaceModel`] into a [`HandlerSpec`] and a
//! [`RegistrationEntry`], and derives the server-facing interface and its
//! registration routine.
//!
//! # Binding order
//!
//! 1. `body = "field"`: the body fills that field, then the query string fills
//!    the remaining top-level fields.
//! 2. `body = "*"`: the body fills the whole object.
//! 3. no body: the query string fills the whole object, except for PATCH,
//!    which binds nothing here.
//! 4. path variables are bound last and may overwrite what body or query set.
//!
//! Validation, invocation and rendering follow, each short-circuiting to an
//! error response on failure.

use heck::ToSnakeCase;
use httpgen_core::{
    BindBackend, BindStep, BodySelector, GeneratorConfig, HandlerSpec, HandlerStep, HttpMethod,
    InterfaceModel, Invocation, MethodMetadata, Registration, RegistrationEntry, RouteRule,
    ServerInterface, ServerMethod, Synthesis,
};
use tracing::debug;

/// Name of the derived server interface, e.g. `DictHttpServer`.
pub fn server_name(interface: &str) -> String {
    format!("{interface}HttpServer")
}

/// Name of the registration routine, e.g. `register_dict_http_server`.
pub fn register_fn_name(interface: &str) -> String {
    format!("register_{}_http_server", interface.to_snake_case())
}

/// Name of one handler routine, unique per `(interface, method, index)`.
pub fn handler_fn_name(interface: &str, method: &str, index: usize) -> String {
    format!(
        "__{}_{}_{index}_http_handler",
        interface.to_snake_case(),
        method.to_snake_case()
    )
}

/// Binding plan of a rule, in execution order.
pub fn binding_plan(rule: &RouteRule, config: &GeneratorConfig) -> Vec<BindStep> {
    let mut steps = Vec::with_capacity(3);
    if config.use_structured_encoding && rule.has_path_variables() {
        steps.push(BindStep::AttachPathParams);
    }
    match rule.body() {
        BodySelector::Field(field) => {
            steps.push(BindStep::BodyField {
                field: field.clone(),
            });
            steps.push(BindStep::Query);
        }
        BodySelector::Whole => steps.push(BindStep::BodyWhole),
        BodySelector::None if rule.verb().is(HttpMethod::Patch) => {}
        BodySelector::None => steps.push(BindStep::Query),
    }
    if rule.has_path_variables() {
        steps.push(BindStep::Path);
    }
    steps
}

/// Synthesize the handler and registration entry of one rule.
pub fn synthesize_rule(
    interface: &str,
    method: &MethodMetadata,
    index: usize,
    rule: &RouteRule,
    config: &GeneratorConfig,
) -> (HandlerSpec, RegistrationEntry) {
    let name = handler_fn_name(interface, &method.name, index);
    let backend = if config.use_structured_encoding {
        BindBackend::Carrier
    } else {
        BindBackend::Framework
    };

    let mut steps: Vec<HandlerStep> = binding_plan(rule, config)
        .into_iter()
        .map(HandlerStep::Bind)
        .collect();
    steps.push(HandlerStep::Validate);
    steps.push(HandlerStep::Invoke(Invocation {
        method: method.name.clone(),
        request: method.param.clone(),
        response: method.result.clone(),
    }));
    steps.push(HandlerStep::Render {
        selector: match rule.response_body() {
            BodySelector::None => BodySelector::Whole,
            selector => selector.clone(),
        },
    });

    debug!(handler = %name, verb = %rule.verb(), path = rule.path(), "synthesized handler");
    let entry = RegistrationEntry {
        verb: rule.verb().clone(),
        path: rule.path().to_string(),
        handler: name.clone(),
    };
    let spec = HandlerSpec::new(interface, &method.name, index, name, backend, steps);
    (spec, entry)
}

/// Synthesize every artifact of one interface, in declaration order.
pub fn synthesize(model: &InterfaceModel, config: &GeneratorConfig) -> Synthesis {
    let server = ServerInterface {
        name: server_name(&model.name),
        docs: model.docs.clone(),
        methods: model
            .methods
            .iter()
            .map(|method| ServerMethod {
                name: method.name.clone(),
                request: method.param.clone(),
                response: method.result.clone(),
                docs: method.docs.clone(),
            })
            .collect(),
    };

    let (handlers, entries): (Vec<_>, Vec<_>) = model
        .routes()
        .map(|(method, index, rule)| synthesize_rule(&model.name, method, index, rule, config))
        .unzip();

    Synthesis {
        registration: Registration {
            name: register_fn_name(&model.name),
            server: server.name.clone(),
            entries,
        },
        server,
        handlers,
    }
}
