use std::collections::HashSet;
use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{ContainerId, DisplayType, DomainError, DomainResult, ObjectId, ObjectKind, Scene};
use crate::infrastructure::traits::SceneStore;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Scene store that rejects selected operations, for exercising the
/// converters' failure boundaries.
///
/// Failures are keyed by object or collection name. It can also report
/// child links the wrapped [`Scene`] would refuse, to mimic hosts that let a
/// collection have several parents.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub scene: Scene,
    unlink: HashSet<String>,
    link: HashSet<String>,
    anchor: HashSet<String>,
    remove: HashSet<String>,
    children: HashSet<String>,
    users: HashSet<String>,
    extra_children: Vec<(String, String)>,
}

impl FailingStore {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Unlinking the named object from any collection fails.
    pub fn fail_unlink(mut self, object: &str) -> Self {
        self.unlink.insert(object.to_string());
        self
    }

    /// Linking the named object into any collection fails.
    pub fn fail_link(mut self, object: &str) -> Self {
        self.link.insert(object.to_string());
        self
    }

    /// Creating an empty with this name fails.
    pub fn fail_new_anchor(mut self, name: &str) -> Self {
        self.anchor.insert(name.to_string());
        self
    }

    /// Removing the named collection fails.
    pub fn fail_remove(mut self, container: &str) -> Self {
        self.remove.insert(container.to_string());
        self
    }

    /// Listing the children of the named collection fails.
    pub fn fail_children(mut self, container: &str) -> Self {
        self.children.insert(container.to_string());
        self
    }

    /// Listing the collections holding the named object fails.
    pub fn fail_users(mut self, object: &str) -> Self {
        self.users.insert(object.to_string());
        self
    }

    /// Report `child` as an additional child of `parent`.
    pub fn with_extra_child(mut self, parent: &str, child: &str) -> Self {
        self.extra_children
            .push((parent.to_string(), child.to_string()));
        self
    }

    fn check_object(&self, set: &HashSet<String>, op: &str, id: ObjectId) -> DomainResult<()> {
        let name = &self.scene.object(id)?.name;
        if set.contains(name) {
            return Err(DomainError::Rejected(format!("injected {op} failure for {name}")));
        }
        Ok(())
    }

    fn check_container(&self, set: &HashSet<String>, op: &str, id: ContainerId) -> DomainResult<()> {
        let name = &self.scene.container(id)?.name;
        if set.contains(name) {
            return Err(DomainError::Rejected(format!("injected {op} failure for {name}")));
        }
        Ok(())
    }
}

impl SceneStore for FailingStore {
    fn root_container(&self) -> ContainerId {
        self.scene.root_container()
    }

    fn containers(&self) -> Vec<ContainerId> {
        self.scene.containers()
    }

    fn objects(&self) -> Vec<ObjectId> {
        self.scene.objects()
    }

    fn container_name(&self, container: ContainerId) -> DomainResult<String> {
        SceneStore::container_name(&self.scene, container)
    }

    fn container_objects(&self, container: ContainerId) -> DomainResult<Vec<ObjectId>> {
        SceneStore::container_objects(&self.scene, container)
    }

    fn container_children(&self, container: ContainerId) -> DomainResult<Vec<ContainerId>> {
        self.check_container(&self.children, "children", container)?;
        let mut children = SceneStore::container_children(&self.scene, container)?;
        let name = &self.scene.container(container)?.name;
        let extra = self
            .extra_children
            .iter()
            .filter(|(parent, _)| parent == name)
            .filter_map(|(_, child)| self.scene.find_container(child));
        children.extend(extra);
        Ok(children)
    }

    fn new_container(&mut self, name: &str) -> DomainResult<ContainerId> {
        Ok(self.scene.new_container(name))
    }

    fn link_container(&mut self, parent: ContainerId, child: ContainerId) -> DomainResult<()> {
        self.scene.link_container(parent, child)
    }

    fn remove_container(&mut self, container: ContainerId) -> DomainResult<()> {
        self.check_container(&self.remove, "remove", container)?;
        self.scene.remove_container(container)
    }

    fn link_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        self.check_object(&self.link, "link", object)?;
        self.scene.link_object(container, object)
    }

    fn unlink_object(&mut self, container: ContainerId, object: ObjectId) -> DomainResult<()> {
        self.check_object(&self.unlink, "unlink", object)?;
        self.scene.unlink_object(container, object)
    }

    fn object_name(&self, object: ObjectId) -> DomainResult<String> {
        SceneStore::object_name(&self.scene, object)
    }

    fn object_kind(&self, object: ObjectId) -> DomainResult<ObjectKind> {
        SceneStore::object_kind(&self.scene, object)
    }

    fn new_anchor(&mut self, name: &str) -> DomainResult<ObjectId> {
        if self.anchor.contains(name) {
            return Err(DomainError::Rejected(format!("injected anchor failure for {name}")));
        }
        Ok(self.scene.add_object(name, ObjectKind::Anchor))
    }

    fn parent(&self, object: ObjectId) -> DomainResult<Option<ObjectId>> {
        SceneStore::parent(&self.scene, object)
    }

    fn set_parent(&mut self, object: ObjectId, parent: Option<ObjectId>) -> DomainResult<()> {
        self.scene.set_parent(object, parent)
    }

    fn set_display_type(&mut self, object: ObjectId, display: DisplayType) -> DomainResult<()> {
        self.scene.set_display_type(object, display)
    }

    fn users_collection(&self, object: ObjectId) -> DomainResult<Vec<ContainerId>> {
        self.check_object(&self.users, "users", object)?;
        self.scene.users_collection(object)
    }
}
