//! CLI demo entry point.
//!
//! # Responsibility
//! - Act as the composition root: build the one store and hand it to the
//!   producer and both list views.
//! - Print deterministic list renderings for quick local sanity checks.

use log::info;
use projboard_core::{
    init_logging, CoreConfig, ProjectListView, ProjectService, ProjectStatus, SharedStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("projboard_core ping={}", projboard_core::ping());
    println!("projboard_core version={}", projboard_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if config.log.log_dir.is_some() {
        if let Err(err) = init_logging(&config.log) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store = SharedStore::new();
    let mut active = ProjectListView::new(ProjectStatus::Active);
    let mut finished = ProjectListView::new(ProjectStatus::Finished);
    active.attach(&store);
    finished.attach(&store);
    let service = ProjectService::with_rules(store, config.input);

    let submissions = [
        ("Build API", "Expose the project board over HTTP", "3"),
        ("Write docs", "Describe the board workflow", "1"),
        ("", "Missing a title", "2"),
    ];
    let mut created = Vec::new();
    for (title, description, people) in submissions {
        match service.submit(title, description, people) {
            Ok(id) => created.push(id),
            Err(err) => println!("rejected submission: {err}"),
        }
    }

    if let Some(first) = created.first() {
        match service.drop_project(&first.to_string(), ProjectStatus::Finished) {
            Ok(outcome) => info!(
                "event=demo_drop module=cli status=ok moved={}",
                outcome.is_moved()
            ),
            Err(err) => println!("drop failed: {err}"),
        }
    }

    for view in [&active, &finished] {
        println!();
        for line in view.render() {
            println!("{line}");
        }
    }

    active.detach();
    finished.detach();
    ExitCode::SUCCESS
}
