//! Editor instance registry
//!
//! A single worker thread owns the committed state of every editor instance
//! and processes requests strictly in arrival order. Committing a new version
//! and notifying readers happen in the same step on that thread, so a ready
//! callback can neither miss the first commit nor fire twice.
//!
//! ```text
//! EditorRegistry ──Request──▶ worker: update(&mut EditorStates, msg) → Cmd → notify
//! ```

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{Document, EditorKey, EditorOptions, EditorStates};
use crate::update::update;

/// Callback fired once an instance's first document is visible to readers
pub type ReadyCallback = Box<dyn FnOnce(Arc<Document>) + Send + 'static>;

/// Errors returned by registry requests
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("editor registry is shut down")]
    Closed,

    #[error("unknown editor instance {0}")]
    UnknownInstance(EditorKey),

    #[error("timed out waiting for editor instance {0}")]
    Timeout(EditorKey),
}

enum Request {
    Dispatch(Msg),
    OnReady {
        key: EditorKey,
        id: u64,
        callback: ReadyCallback,
    },
    CancelReady {
        key: EditorKey,
        id: u64,
    },
    PendingReady {
        reply: Sender<usize>,
    },
    Snapshot {
        key: EditorKey,
        reply: Sender<Option<Arc<Document>>>,
    },
    Subscribe {
        key: EditorKey,
        subscriber: Sender<Arc<Document>>,
        reply: Sender<bool>,
    },
    Keys {
        reply: Sender<Vec<EditorKey>>,
    },
    Shutdown,
}

/// Handle to the registry worker. Dropping it stops and joins the worker.
pub struct EditorRegistry {
    requests: Sender<Request>,
    worker: Option<JoinHandle<()>>,
    next_ready_id: AtomicU64,
}

impl EditorRegistry {
    /// Start a registry whose new instances receive `options`
    pub fn new(options: EditorOptions) -> Self {
        let (requests, inbox) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("editor-registry".into())
            .spawn(move || Worker::new(options).run(inbox));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                // requests fail with Closed once the inbox is dropped
                warn!("Failed to start registry worker: {}", e);
                None
            }
        };
        info!(target: "registry", "registry started");

        Self {
            requests,
            worker,
            next_ready_id: AtomicU64::new(1),
        }
    }

    /// Create a fresh document for `key`
    pub fn construct(&self, key: EditorKey) -> Result<(), RegistryError> {
        self.dispatch(Msg::Construct(key))
    }

    /// Create a fresh document for `key` and run `on_ready` once it is visible
    pub fn construct_with<F>(&self, key: EditorKey, on_ready: F) -> Result<(), RegistryError>
    where
        F: FnOnce(Arc<Document>) + Send + 'static,
    {
        self.on_ready(key, on_ready)?;
        self.construct(key)
    }

    /// Drop the document of `key`
    pub fn deconstruct(&self, key: EditorKey) -> Result<(), RegistryError> {
        self.dispatch(Msg::Deconstruct(key))
    }

    /// Queue a message; it is applied after every previously queued request
    pub fn dispatch(&self, msg: Msg) -> Result<(), RegistryError> {
        self.send(Request::Dispatch(msg))
    }

    /// Run `callback` on the worker thread right after the first document of
    /// `key` is committed, or immediately if it already exists.
    ///
    /// A panicking callback is logged and does not stop the worker.
    /// Deconstructing `key` drops callbacks still waiting for it.
    pub fn on_ready<F>(&self, key: EditorKey, callback: F) -> Result<(), RegistryError>
    where
        F: FnOnce(Arc<Document>) + Send + 'static,
    {
        self.register_ready(key, Box::new(callback)).map(|_| ())
    }

    /// Block until `key` has a committed document
    pub fn wait_until_ready(&self, key: EditorKey) -> Result<Arc<Document>, RegistryError> {
        let (tx, rx) = mpsc::channel();
        self.on_ready(key, move |doc| {
            let _ = tx.send(doc);
        })?;
        rx.recv().map_err(|_| self.waiter_dropped(key))
    }

    /// Like `wait_until_ready`, giving up after `timeout`
    pub fn wait_until_ready_timeout(
        &self,
        key: EditorKey,
        timeout: Duration,
    ) -> Result<Arc<Document>, RegistryError> {
        let (tx, rx) = mpsc::channel();
        let id = self.register_ready(
            key,
            Box::new(move |doc| {
                let _ = tx.send(doc);
            }),
        )?;
        rx.recv_timeout(timeout).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => {
                // after a racing commit the cancel finds nothing to remove
                let _ = self.send(Request::CancelReady { key, id });
                RegistryError::Timeout(key)
            }
            mpsc::RecvTimeoutError::Disconnected => self.waiter_dropped(key),
        })
    }

    /// Number of ready callbacks still waiting for their instance
    pub fn pending_ready_count(&self) -> Result<usize, RegistryError> {
        let (reply, rx) = mpsc::channel();
        self.send(Request::PendingReady { reply })?;
        rx.recv().map_err(|_| RegistryError::Closed)
    }

    /// The committed document of `key`, after all previously queued requests
    pub fn snapshot(&self, key: EditorKey) -> Result<Arc<Document>, RegistryError> {
        let (reply, rx) = mpsc::channel();
        self.send(Request::Snapshot { key, reply })?;
        rx.recv()
            .map_err(|_| RegistryError::Closed)?
            .ok_or(RegistryError::UnknownInstance(key))
    }

    /// Receive every document version committed for `key` from now on
    pub fn subscribe(&self, key: EditorKey) -> Result<Receiver<Arc<Document>>, RegistryError> {
        let (subscriber, updates) = mpsc::channel();
        let (reply, rx) = mpsc::channel();
        self.send(Request::Subscribe {
            key,
            subscriber,
            reply,
        })?;
        if rx.recv().map_err(|_| RegistryError::Closed)? {
            Ok(updates)
        } else {
            Err(RegistryError::UnknownInstance(key))
        }
    }

    /// Keys of all live instances, sorted
    pub fn keys(&self) -> Result<Vec<EditorKey>, RegistryError> {
        let (reply, rx) = mpsc::channel();
        self.send(Request::Keys { reply })?;
        rx.recv().map_err(|_| RegistryError::Closed)
    }

    fn register_ready(&self, key: EditorKey, callback: ReadyCallback) -> Result<u64, RegistryError> {
        let id = self.next_ready_id.fetch_add(1, Ordering::Relaxed);
        self.send(Request::OnReady { key, id, callback })?;
        Ok(id)
    }

    /// Why a waiter's callback was dropped unfired: the instance was
    /// deconstructed while the registry kept running, or the registry stopped
    fn waiter_dropped(&self, key: EditorKey) -> RegistryError {
        match self.keys() {
            Ok(_) => RegistryError::UnknownInstance(key),
            Err(e) => e,
        }
    }

    fn send(&self, request: Request) -> Result<(), RegistryError> {
        self.requests
            .send(request)
            .map_err(|_| RegistryError::Closed)
    }
}

impl Default for EditorRegistry {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}

impl Drop for EditorRegistry {
    fn drop(&mut self) {
        let _ = self.requests.send(Request::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!(target: "registry", "registry worker panicked");
            }
        }
    }
}

/// State owned by the worker thread
struct Worker {
    states: EditorStates,
    pending_ready: HashMap<EditorKey, Vec<(u64, ReadyCallback)>>,
    subscribers: HashMap<EditorKey, Vec<Sender<Arc<Document>>>>,
}

impl Worker {
    fn new(options: EditorOptions) -> Self {
        Self {
            states: EditorStates::new(options),
            pending_ready: HashMap::new(),
            subscribers: HashMap::new(),
        }
    }

    fn run(mut self, inbox: Receiver<Request>) {
        while let Ok(request) = inbox.recv() {
            match request {
                Request::Dispatch(msg) => {
                    if let Msg::Deconstruct(key) = &msg {
                        self.drop_pending(*key);
                    }
                    if let Some(cmd) = update(&mut self.states, msg) {
                        self.process_cmd(cmd);
                    }
                }
                Request::OnReady { key, id, callback } => match self.states.get(key) {
                    Some(doc) => run_ready_callback(key, callback, Arc::clone(doc)),
                    None => self
                        .pending_ready
                        .entry(key)
                        .or_default()
                        .push((id, callback)),
                },
                Request::CancelReady { key, id } => {
                    if let Some(callbacks) = self.pending_ready.get_mut(&key) {
                        callbacks.retain(|(pending, _)| *pending != id);
                        if callbacks.is_empty() {
                            self.pending_ready.remove(&key);
                        }
                    }
                }
                Request::PendingReady { reply } => {
                    let _ = reply.send(self.pending_ready.values().map(Vec::len).sum());
                }
                Request::Snapshot { key, reply } => {
                    let _ = reply.send(self.states.get(key).cloned());
                }
                Request::Subscribe {
                    key,
                    subscriber,
                    reply,
                } => {
                    let known = self.states.contains(key);
                    if known {
                        self.subscribers.entry(key).or_default().push(subscriber);
                    }
                    let _ = reply.send(known);
                }
                Request::Keys { reply } => {
                    let mut keys: Vec<_> = self.states.keys().collect();
                    keys.sort();
                    let _ = reply.send(keys);
                }
                Request::Shutdown => break,
            }
        }
        info!(
            target: "registry",
            instances = self.states.len(),
            "registry stopped"
        );
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Publish { key, version } => {
                let Some(doc) = self.states.get(key).cloned() else {
                    return;
                };
                debug!(target: "registry", %key, %version, "publish");

                if let Some(callbacks) = self.pending_ready.remove(&key) {
                    for (_, callback) in callbacks {
                        run_ready_callback(key, callback, Arc::clone(&doc));
                    }
                }
                if let Some(subscribers) = self.subscribers.get_mut(&key) {
                    subscribers.retain(|s| s.send(Arc::clone(&doc)).is_ok());
                }
            }
            Cmd::Release { key } => {
                // dropping the senders ends every subscription
                self.subscribers.remove(&key);
            }
        }
    }

    /// Forget callbacks waiting for `key`; their waiters see the drop
    fn drop_pending(&mut self, key: EditorKey) {
        if let Some(callbacks) = self.pending_ready.remove(&key) {
            debug!(
                target: "registry",
                %key,
                count = callbacks.len(),
                "dropping pending ready callbacks"
            );
        }
    }
}

/// Run a user callback, keeping the worker alive if it panics
fn run_ready_callback(key: EditorKey, callback: ReadyCallback, doc: Arc<Document>) {
    if panic::catch_unwind(AssertUnwindSafe(move || callback(doc))).is_err() {
        warn!(target: "registry", %key, "ready callback panicked");
    }
}
