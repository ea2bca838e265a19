// Module layout (Clean Architecture style)
// - bootstrap: configuration and dependency wiring
// - infrastructure: Postgres, in-memory and password-hashing adapters
// - presentation: HTTP handlers and routing
// - application: ports and use cases (signup, login, account lookup)
// - domain: account model

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

#[cfg(test)]
pub(crate) mod test_support;
