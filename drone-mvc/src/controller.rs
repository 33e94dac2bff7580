// Controller contract and action tables

use crate::ControllerError;
use crate::params::RequestParams;
use std::collections::HashMap;

/// A constructed controller ready to run one of its views.
///
/// In controller terms a view is a method: the router binds the resolved
/// view with [`set_method`](Controller::set_method) and later triggers
/// [`execute`](Controller::execute).
pub trait Controller: Send + 'static {
    /// Bind the view (method) that `execute` will run
    fn set_method(&mut self, view: &str);

    /// Run the bound view
    fn execute(&mut self) -> Result<(), ControllerError>;

    /// The currently bound view, if any
    fn method(&self) -> Option<&str> {
        None
    }
}

/// What a controller factory knows about the request it builds for.
#[derive(Debug, Clone, Copy)]
pub struct ControllerContext<'a> {
    pub module: &'a str,
    pub controller: &'a str,
    pub view: &'a str,
    pub params: &'a RequestParams,
}

/// Visibility of a controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

type ActionFn<C> = fn(&mut C) -> Result<(), ControllerError>;

/// Named actions of a controller type.
///
/// Factories use [`resolve`](ActionTable::resolve) to reject a view before
/// the controller exists: unknown names fail with `MethodNotFound`, private
/// actions with `PrivateMethodExecution`.
///
/// ```
/// use drone_mvc::{ActionTable, ControllerError};
///
/// struct Posts { rendered: Vec<&'static str> }
///
/// let actions = ActionTable::<Posts>::new("Posts")
///     .public("list", |c| { c.rendered.push("list"); Ok(()) })
///     .private("load", |_| Ok(()));
///
/// assert!(actions.resolve("list").is_ok());
/// assert!(matches!(actions.resolve("load"), Err(ControllerError::PrivateMethodExecution(_))));
/// assert!(matches!(actions.resolve("edit"), Err(ControllerError::MethodNotFound(_))));
/// ```
pub struct ActionTable<C> {
    controller: &'static str,
    actions: HashMap<&'static str, (Visibility, ActionFn<C>)>,
}

impl<C> ActionTable<C> {
    pub fn new(controller: &'static str) -> Self {
        Self {
            controller,
            actions: HashMap::new(),
        }
    }

    pub fn public(mut self, name: &'static str, action: ActionFn<C>) -> Self {
        self.actions.insert(name, (Visibility::Public, action));
        self
    }

    pub fn private(mut self, name: &'static str, action: ActionFn<C>) -> Self {
        self.actions.insert(name, (Visibility::Private, action));
        self
    }

    pub fn visibility(&self, name: &str) -> Option<Visibility> {
        self.actions.get(name).map(|(visibility, _)| *visibility)
    }

    /// Check that `view` names a public action
    pub fn resolve(&self, view: &str) -> Result<(), ControllerError> {
        match self.visibility(view) {
            Some(Visibility::Public) => Ok(()),
            Some(Visibility::Private) => Err(ControllerError::PrivateMethodExecution(format!(
                "The method '{}' is not public in the control class '{}'",
                view, self.controller
            ))),
            None => Err(ControllerError::MethodNotFound(format!(
                "The action '{}' does not exist in the control class '{}'",
                view, self.controller
            ))),
        }
    }

    /// Run the public action `view` on `controller`
    pub fn invoke(&self, controller: &mut C, view: &str) -> Result<(), ControllerError> {
        self.resolve(view)?;
        match self.actions.get(view) {
            Some((_, action)) => action(controller),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        hits: u32,
    }

    fn table() -> ActionTable<Counter> {
        ActionTable::<Counter>::new("Counter")
            .public("hit", |c| {
                c.hits += 1;
                Ok(())
            })
            .public("fail", |_| Err(ControllerError::Execution("boom".into())))
            .private("reset", |c| {
                c.hits = 0;
                Ok(())
            })
    }

    #[test]
    fn test_resolve_visibility() {
        let actions = table();
        assert!(actions.resolve("hit").is_ok());
        assert_eq!(actions.visibility("reset"), Some(Visibility::Private));

        let err = actions.resolve("reset").unwrap_err();
        assert!(matches!(err, ControllerError::PrivateMethodExecution(_)));
        assert!(err.message().contains("'reset'"));

        let err = actions.resolve("missing").unwrap_err();
        assert!(matches!(err, ControllerError::MethodNotFound(_)));
        assert!(err.message().contains("Counter"));
    }

    #[test]
    fn test_invoke_runs_public_action() {
        let actions = table();
        let mut counter = Counter::default();

        actions.invoke(&mut counter, "hit").unwrap();
        actions.invoke(&mut counter, "hit").unwrap();
        assert_eq!(counter.hits, 2);

        assert!(actions.invoke(&mut counter, "reset").is_err());
        assert_eq!(counter.hits, 2);

        assert_eq!(
            actions.invoke(&mut counter, "fail"),
            Err(ControllerError::Execution("boom".into()))
        );
    }
}
