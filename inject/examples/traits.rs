//! Binding trait objects and injecting several dependencies at once.

use fibre_inject::{implements, Container, Injectable};
use std::sync::Arc;

trait Clock: Send + Sync {
  fn now(&self) -> u64;
}

trait Notifier: Send + Sync {
  fn notify(&self, text: &str);
}

struct FixedClock;
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    1_700_000_000
  }
}
impl Injectable for FixedClock {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    FixedClock
  }
}

struct StdoutNotifier;
impl Notifier for StdoutNotifier {
  fn notify(&self, text: &str) {
    println!("[notify] {}", text);
  }
}
impl Injectable for StdoutNotifier {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    StdoutNotifier
  }
}

implements!(dyn Clock => FixedClock);
implements!(dyn Notifier => StdoutNotifier);

// Depends only on the abstractions; the container picks the implementations.
struct Scheduler {
  clock: Arc<dyn Clock>,
  notifier: Arc<dyn Notifier>,
}

impl Injectable for Scheduler {
  type Dependencies = (Arc<dyn Clock>, Arc<dyn Notifier>);

  fn inject((clock, notifier): Self::Dependencies) -> Self {
    Scheduler { clock, notifier }
  }
}

impl Scheduler {
  fn schedule(&self, job: &str, delay: u64) {
    let at = self.clock.now() + delay;
    self.notifier.notify(&format!("'{}' scheduled at {}", job, at));
  }
}

fn main() {
  let container = Container::new();
  container.bind::<dyn Clock>().to::<FixedClock>().as_singleton();
  container.bind::<dyn Notifier>().to::<StdoutNotifier>();
  container.bind::<Scheduler>().to_self();

  // Nothing is constructed until here, and nothing is missing.
  assert!(container.validate().is_ok());

  let scheduler = container.get::<Scheduler>().unwrap();
  scheduler.schedule("backup", 60);
  scheduler.schedule("report", 3600);
}
