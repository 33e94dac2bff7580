// Mock controllers, factories and module hooks

use drone_mvc::{
    Controller, ControllerContext, ControllerError, ControllerRegistry, Module, RouteDescriptor,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Call log shared between a factory, the mocks it builds and the test
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a call
    pub fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of calls
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Check if a call was recorded
    pub fn was_called(&self, call: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == call)
    }

    /// Clear all recorded calls
    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// Mock controller recording `set_method` and `execute` calls.
///
/// Entries look like `set_method:show` and `execute:show`.
pub struct MockController {
    class_name: String,
    method: Option<String>,
    log: CallLog,
    execute_error: Option<ControllerError>,
}

impl MockController {
    pub fn new(class_name: &str, log: CallLog) -> Self {
        Self {
            class_name: class_name.to_string(),
            method: None,
            log,
            execute_error: None,
        }
    }

    /// Make `execute` fail with `error`
    pub fn failing_with(mut self, error: ControllerError) -> Self {
        self.execute_error = Some(error);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }
}

impl Controller for MockController {
    fn set_method(&mut self, view: &str) {
        self.log.record(format!("set_method:{}", view));
        self.method = Some(view.to_string());
    }

    fn execute(&mut self) -> Result<(), ControllerError> {
        let view = self.method.as_deref().unwrap_or_default();
        self.log.record(format!("execute:{}", view));
        match &self.execute_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }
}

/// Factory building [`MockController`]s.
///
/// By default every view is accepted. Declaring views restricts the
/// controller to them: anything else fails construction with
/// `MethodNotFound`, and private views with `PrivateMethodExecution`.
///
/// ```
/// use drone_mvc::ControllerRegistry;
/// use drone_testing::MockFactory;
///
/// let factory = MockFactory::new("blog::Index").with_views(&["show"]);
/// let mut registry = ControllerRegistry::new();
/// factory.register(&mut registry);
///
/// assert!(registry.contains("blog::Index"));
/// ```
#[derive(Clone)]
pub struct MockFactory {
    class_name: String,
    log: CallLog,
    public_views: Option<HashSet<String>>,
    private_views: HashSet<String>,
    construction_error: Option<ControllerError>,
    execute_error: Option<ControllerError>,
}

impl MockFactory {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            log: CallLog::new(),
            public_views: None,
            private_views: HashSet::new(),
            construction_error: None,
            execute_error: None,
        }
    }

    /// Share an existing call log, e.g. with a [`RecordingModule`]
    pub fn with_log(mut self, log: CallLog) -> Self {
        self.log = log;
        self
    }

    /// Restrict the controller to these public views
    pub fn with_views(mut self, views: &[&str]) -> Self {
        self.public_views = Some(views.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn with_private_views(mut self, views: &[&str]) -> Self {
        self.private_views = views.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Fail every construction with `error`
    pub fn failing_with(mut self, error: ControllerError) -> Self {
        self.construction_error = Some(error);
        self
    }

    /// Build controllers whose `execute` fails with `error`
    pub fn failing_execution(mut self, error: ControllerError) -> Self {
        self.execute_error = Some(error);
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Build a mock for the context, recording `construct:<view>`
    pub fn build(&self, ctx: &ControllerContext<'_>) -> Result<MockController, ControllerError> {
        self.log.record(format!("construct:{}", ctx.view));

        if let Some(error) = &self.construction_error {
            return Err(error.clone());
        }

        if self.private_views.contains(ctx.view) {
            return Err(ControllerError::PrivateMethodExecution(format!(
                "The action '{}' of the control class '{}' is not public",
                ctx.view, self.class_name
            )));
        }

        if let Some(views) = &self.public_views {
            if !views.contains(ctx.view) {
                return Err(ControllerError::MethodNotFound(format!(
                    "The action '{}' does not exist in the control class '{}'",
                    ctx.view, self.class_name
                )));
            }
        }

        let mut controller = MockController::new(&self.class_name, self.log.clone());
        if let Some(error) = &self.execute_error {
            controller = controller.failing_with(error.clone());
        }
        Ok(controller)
    }

    /// Register this factory under its class name
    pub fn register(&self, registry: &mut ControllerRegistry) {
        let factory = self.clone();
        registry.register(self.class_name.clone(), move |ctx| {
            factory
                .build(ctx)
                .map(|c| Box::new(c) as Box<dyn Controller>)
        });
    }
}

/// Module hook recording `init:<module>` and the descriptor it was given
pub struct RecordingModule {
    name: String,
    log: CallLog,
    configs: Arc<Mutex<Vec<RouteDescriptor>>>,
}

impl RecordingModule {
    pub fn new(name: &str, log: CallLog) -> Self {
        Self {
            name: name.to_string(),
            log,
            configs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle on the descriptors seen so far, usable after registration
    pub fn configs(&self) -> Arc<Mutex<Vec<RouteDescriptor>>> {
        Arc::clone(&self.configs)
    }
}

impl Module for RecordingModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&self, _controller: &mut dyn Controller, config: &RouteDescriptor) {
        self.log.record(format!("init:{}", self.name));
        self.configs.lock().unwrap().push(config.clone());
    }
}
