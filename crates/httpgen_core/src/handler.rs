//! Handler plans and registration entries produced by synthesis.

use serde::{Deserialize, Serialize};

use crate::route::{BodySelector, FieldPath, Verb};

/// Which machinery performs the binds of a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindBackend {
    /// The router's own extractors.
    Framework,
    /// The call carrier's encoding layer.
    Carrier,
}

/// One population step of the request object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "bind", rename_all = "snake_case")]
pub enum BindStep {
    /// Store raw path parameters on the carrier before any bind runs.
    AttachPathParams,
    /// Decode the request body into the whole object.
    BodyWhole,
    /// Decode the request body into one field of the object.
    BodyField { field: FieldPath },
    /// Fill the whole object from the query string.
    Query,
    /// Fill path variables into the object. Runs last and may overwrite.
    Path,
}

/// How the server method is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub method: String,
    pub request: String,
    pub response: String,
}

/// The full bind / validate / invoke / render sequence of a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum HandlerStep {
    Bind(BindStep),
    /// Short-circuits to an error response on failure.
    Validate,
    /// Short-circuits to an error response on failure.
    Invoke(Invocation),
    Render { selector: BodySelector },
}

/// Everything needed to emit one handler routine for one (method, rule) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerSpec {
    interface: String,
    method: String,
    index: usize,
    name: String,
    backend: BindBackend,
    steps: Vec<HandlerStep>,
}

impl HandlerSpec {
    pub fn new(
        interface: &str,
        method: &str,
        index: usize,
        name: String,
        backend: BindBackend,
        steps: Vec<HandlerStep>,
    ) -> Self {
        Self {
            interface: interface.to_string(),
            method: method.to_string(),
            index,
            name,
            backend,
            steps,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Position of the rule within its method.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Routine name; unique per `(interface, method, index)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> BindBackend {
        self.backend
    }

    pub fn steps(&self) -> &[HandlerStep] {
        &self.steps
    }

    /// Binding plan only, in execution order.
    pub fn bindings(&self) -> impl Iterator<Item = &BindStep> {
        self.steps.iter().filter_map(|step| match step {
            HandlerStep::Bind(bind) => Some(bind),
            _ => None,
        })
    }

    pub fn invocation(&self) -> Option<&Invocation> {
        self.steps.iter().find_map(|step| match step {
            HandlerStep::Invoke(invocation) => Some(invocation),
            _ => None,
        })
    }

    pub fn render_selector(&self) -> Option<&BodySelector> {
        self.steps.iter().find_map(|step| match step {
            HandlerStep::Render { selector } => Some(selector),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEntry {
    pub verb: Verb,
    /// Path in the router's variable syntax.
    pub path: String,
    pub handler: String,
}

/// Method of the derived server interface: `(carrier, request) -> (response, error)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMethod {
    pub name: String,
    pub request: String,
    pub response: String,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInterface {
    pub name: String,
    pub docs: Vec<String>,
    pub methods: Vec<ServerMethod>,
}

/// Registration routine: attaches every entry to a router, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub server: String,
    pub entries: Vec<RegistrationEntry>,
}

/// All synthesized artifacts of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synthesis {
    pub server: ServerInterface,
    pub registration: Registration,
    pub handlers: Vec<HandlerSpec>,
}
