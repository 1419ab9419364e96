//! Transient and singleton scopes, including concurrent first access.

use fibre_inject::{Container, Injectable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

static POOLS_OPENED: AtomicUsize = AtomicUsize::new(0);
static SESSIONS_OPENED: AtomicUsize = AtomicUsize::new(0);

// Expensive to create, so the application wants exactly one.
struct ConnectionPool;

impl Injectable for ConnectionPool {
  type Dependencies = ();

  fn inject(_: ()) -> Self {
    POOLS_OPENED.fetch_add(1, Ordering::SeqCst);
    ConnectionPool
  }
}

// Cheap, one per unit of work.
struct Session {
  number: usize,
  pool: Arc<ConnectionPool>,
}

impl Injectable for Session {
  type Dependencies = Arc<ConnectionPool>;

  fn inject(pool: Self::Dependencies) -> Self {
    Session {
      number: SESSIONS_OPENED.fetch_add(1, Ordering::SeqCst),
      pool,
    }
  }
}

fn main() {
  let container = Container::new();
  container.bind::<ConnectionPool>().to_self().as_singleton();
  container.bind::<Session>().to_self();

  let sessions: Vec<Arc<Session>> = thread::scope(|s| {
    let workers: Vec<_> = (0..8)
      .map(|_| s.spawn(|| container.get::<Session>().unwrap()))
      .collect();
    workers.into_iter().map(|w| w.join().unwrap()).collect()
  });

  for session in &sessions {
    assert!(Arc::ptr_eq(&session.pool, &sessions[0].pool));
  }
  println!(
    "{} sessions opened against {} pool(s)",
    SESSIONS_OPENED.load(Ordering::SeqCst),
    POOLS_OPENED.load(Ordering::SeqCst)
  );
  assert_eq!(POOLS_OPENED.load(Ordering::SeqCst), 1);

  let mut numbers: Vec<_> = sessions.iter().map(|session| session.number).collect();
  numbers.sort_unstable();
  assert_eq!(numbers, (0..8).collect::<Vec<_>>());
}
