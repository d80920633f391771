//! Handlers called outside the mount window log a warning instead of failing.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use fielder_binding::testing::{MockElement, RecordingStore};
use fielder_binding::{ChangeEvent, FieldBinding, FieldConfig};
use rstest::rstest;
use serial_test::serial;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Captures `[LEVEL] message` lines.
struct LogCapture {
	logs: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
	fn on_event(
		&self,
		event: &tracing::Event<'_>,
		_ctx: tracing_subscriber::layer::Context<'_, S>,
	) {
		struct MessageVisitor {
			message: String,
		}

		impl tracing::field::Visit for MessageVisitor {
			fn record_debug(
				&mut self,
				field: &tracing::field::Field,
				value: &dyn std::fmt::Debug,
			) {
				if field.name() == "message" {
					self.message = format!("{:?}", value);
				}
			}
		}

		let mut visitor = MessageVisitor {
			message: String::new(),
		};
		event.record(&mut visitor);

		self.logs.lock().unwrap().push(format!(
			"[{}] {}",
			event.metadata().level(),
			visitor.message
		));
	}
}

fn capture_logs() -> (Arc<Mutex<Vec<String>>>, tracing::subscriber::DefaultGuard) {
	let logs = Arc::new(Mutex::new(Vec::new()));
	let guard = tracing_subscriber::registry()
		.with(LogCapture { logs: logs.clone() })
		.set_default();
	(logs, guard)
}

fn warnings(logs: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
	logs.lock()
		.unwrap()
		.iter()
		.filter(|line| line.starts_with("[WARN]"))
		.cloned()
		.collect()
}

#[rstest]
#[serial(handler_logs)]
fn test_handler_after_unmount_warns() {
	// Arrange
	let (logs, _guard) = capture_logs();
	let store = Rc::new(RecordingStore::new());
	let binding = FieldBinding::<MockElement>::mount(store.clone(), FieldConfig::new("f"));
	let (props, _) = binding.response();
	binding.unmount();

	// Act
	props.on_change.call(ChangeEvent::textarea("late"));

	// Assert
	assert!(store.change_requests().is_empty());
	let warned = warnings(&logs);
	assert_eq!(warned.len(), 1);
	assert!(warned[0].contains("ignoring handler call"));
}

#[rstest]
#[serial(handler_logs)]
fn test_handler_after_drop_warns() {
	let (logs, _guard) = capture_logs();
	let store = Rc::new(RecordingStore::new());
	let binding = FieldBinding::<MockElement>::mount(store.clone(), FieldConfig::new("f"));
	let (props, _) = binding.response();
	drop(binding);

	props.on_blur.call(());

	assert!(store.blur_requests().is_empty());
	assert_eq!(warnings(&logs).len(), 1);
}

#[rstest]
#[case(false)]
#[case(true)]
#[serial(handler_logs)]
fn test_ref_release_after_teardown_is_silent(#[case] drop_binding: bool) {
	let (logs, _guard) = capture_logs();
	let store = Rc::new(RecordingStore::new());
	let binding = FieldBinding::<MockElement>::mount(store.clone(), FieldConfig::new("f"));
	let (props, _) = binding.response();
	props.node_ref.call(Some(MockElement::checkbox("a")));
	binding.unmount();
	if drop_binding {
		drop(binding);
	}

	props.node_ref.call(None);

	assert!(warnings(&logs).is_empty());
	assert_eq!(store.calls().len(), 2);
}

#[rstest]
#[serial(handler_logs)]
fn test_renamed_render_warns_once() {
	let (logs, _guard) = capture_logs();
	let store = Rc::new(RecordingStore::new());
	let binding = FieldBinding::<MockElement>::mount(store, FieldConfig::new("f"));

	binding.render(FieldConfig::new("g"));
	binding.render(FieldConfig::new("f"));

	let warned = warnings(&logs);
	assert_eq!(warned.len(), 1);
	assert!(warned[0].contains("field name changed"));
}
