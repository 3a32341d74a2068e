//! Tabstack Walkthrough: Multi-Tab Navigation
//!
//! Drives a stack manager through the moves a tabbed app makes all day:
//! replace and add pushes, back navigation across a replace boundary, tab
//! switches that keep each stack's state warm, and a snapshot save/restore
//! standing in for a process restart. The surface host prints every mount and
//! unmount so the ordering is visible.
//!
//! ```bash
//! cargo run --example nav_demo
//! ```

use serde_json::{Value, json};
use tabstack::{
    DismissReason, NullViewStateStore, PresentReason, PushMode, Result, Screen, ScreenLifecycle,
    ScreenRegistry, StackManager, SurfaceHost, TransitionLegs, TransitionSpec,
};

struct DemoScreen {
    title: String,
    visits: u64,
}

impl DemoScreen {
    fn boxed(title: &str) -> Box<dyn Screen> {
        Box::new(Self {
            title: title.to_string(),
            visits: 0,
        })
    }
}

impl Screen for DemoScreen {
    fn kind(&self) -> &str {
        "demo"
    }

    fn args(&self) -> Value {
        json!({ "title": self.title })
    }

    fn lifecycle(&self) -> Option<&dyn ScreenLifecycle> {
        Some(self)
    }

    fn lifecycle_mut(&mut self) -> Option<&mut dyn ScreenLifecycle> {
        Some(self)
    }
}

impl ScreenLifecycle for DemoScreen {
    fn on_presented(&mut self, reason: PresentReason) {
        self.visits += 1;
        println!(
            "  [screen] {} presented ({}) · visit {}",
            self.title,
            reason.as_str(),
            self.visits
        );
    }

    fn on_dismissed(&mut self, reason: DismissReason) {
        println!("  [screen] {} dismissed ({})", self.title, reason.as_str());
    }

    fn export_state(&self) -> Option<Value> {
        Some(json!({ "visits": self.visits }))
    }

    fn import_state(&mut self, state: Value) {
        if let Some(visits) = state.get("visits").and_then(Value::as_u64) {
            self.visits = visits;
        }
    }
}

struct PrintingSurface;

fn title_of(screen: &dyn Screen) -> String {
    screen.args()["title"]
        .as_str()
        .unwrap_or("untitled")
        .to_string()
}

fn legs_label(legs: Option<&TransitionLegs>) -> String {
    legs.map(|legs| format!(" [{} / {}]", legs.enter, legs.exit))
        .unwrap_or_default()
}

impl SurfaceHost for PrintingSurface {
    fn replace(&mut self, screen: &mut dyn Screen, legs: Option<&TransitionLegs>) {
        println!("  [surface] swap -> {}{}", title_of(screen), legs_label(legs));
    }

    fn add(&mut self, screen: &mut dyn Screen, legs: Option<&TransitionLegs>) {
        println!("  [surface] add  -> {}{}", title_of(screen), legs_label(legs));
    }

    fn remove(&mut self, screen: &mut dyn Screen, legs: Option<&TransitionLegs>) {
        println!("  [surface] drop -> {}{}", title_of(screen), legs_label(legs));
    }
}

fn build_manager() -> StackManager {
    let mut registry = ScreenRegistry::new();
    registry.register("demo", |args| {
        let title = args
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("untitled")
            .to_string();
        Ok(Box::new(DemoScreen { title, visits: 0 }))
    });
    StackManager::new(
        registry,
        Box::new(PrintingSurface),
        Box::new(NullViewStateStore),
    )
}

fn main() -> Result<()> {
    println!("Tabstack Walkthrough · Multi-Tab Navigation\n");

    let slide = TransitionSpec::of("slide_in", "slide_out", "slide_back_in", "slide_back_out");
    let mut manager = build_manager();

    println!("-- home tab: root, then a detail layered on top");
    manager.switch_to_tab("home");
    manager.push(DemoScreen::boxed("Feed"), None, PushMode::Replace)?;
    manager.push(
        DemoScreen::boxed("Article"),
        Some(slide.clone()),
        PushMode::Add,
    )?;

    println!("\n-- a replace push supersedes the article");
    manager.push(
        DemoScreen::boxed("Composer"),
        Some(slide.clone()),
        PushMode::Replace,
    )?;

    println!("\n-- back: the feed segment comes back, article re-layered");
    manager.on_back_pressed();

    println!("\n-- over to the search tab (empty, so the caller seeds a root)");
    if !manager.switch_to_tab("search").as_bool() {
        manager.push(DemoScreen::boxed("Search"), None, PushMode::Replace)?;
    }

    println!("\n-- and back home: the layered stack is rebuilt as it was");
    manager.switch_to_tab("home");

    println!("\n-- snapshot, then rebuild a fresh manager from it");
    let snapshot = manager.save();
    println!("{}\n", snapshot.to_json_pretty()?);

    let mut revived = build_manager();
    revived.restore(snapshot);
    println!(
        "\nrevived: active tab `{}`, {} screens on it, {} known tabs",
        revived.current_tab_id(),
        revived.current_tab_size(),
        revived.tab_ids().len()
    );

    Ok(())
}
