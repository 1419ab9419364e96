use fibre_inject::{implements, Container, ContainerConfig, Injectable};
use std::sync::Arc;

trait DataSource: Send + Sync {
  fn read(&self) -> String;
}

struct ProductionData;
impl DataSource for ProductionData {
  fn read(&self) -> String {
    "production data".to_string()
  }
}
impl Injectable for ProductionData {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    ProductionData
  }
}

struct TestData;
impl DataSource for TestData {
  fn read(&self) -> String {
    "test data".to_string()
  }
}
impl Injectable for TestData {
  type Dependencies = ();
  fn inject(_: ()) -> Self {
    TestData
  }
}

implements!(dyn DataSource => ProductionData, TestData);

struct Processor {
  source: Arc<dyn DataSource>,
}
impl Injectable for Processor {
  type Dependencies = Arc<dyn DataSource>;
  fn inject(source: Self::Dependencies) -> Self {
    Processor { source }
  }
}

impl Processor {
  fn process(&self) -> String {
    format!("Processed: {}", self.source.read().to_uppercase())
  }
}

fn main() {
  // --- The application's root container ---
  let app = Container::with_config(ContainerConfig::new().with_label("app"));
  app.bind::<dyn DataSource>().to::<ProductionData>().as_singleton();
  app.bind::<Processor>().to_self();

  println!("{}", app.get::<Processor>().unwrap().process());

  // --- A child container overriding one binding ---
  // The child borrows the parent, so it cannot outlive it.
  let test = app.child_with_config(ContainerConfig::new().with_label("test"));
  test.bind::<dyn DataSource>().to::<TestData>();

  // `Processor` comes from the parent, its data source from the child.
  let result = test.get::<Processor>().unwrap().process();
  println!("{}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // The override is invisible to the parent.
  assert_eq!(
    app.get::<Processor>().unwrap().process(),
    "Processed: PRODUCTION DATA"
  );
  println!("\nVerified that the child's binding did not leak into the parent.");
}
