//! Demo entry point: load a dataset, link a console listener to its index
//! space, and drive a few selection/masking ticks.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use blf_core::events::{events, handler_from_fn};
use blf_core::{DataSet, IndexAttributes, Session, SpaceListener};
use blf_data::{export_highlighted, ClusteredTabularStore, CsvOptions, Store, TabularStore};

/// Listener that logs every delta it receives, standing in for a plot.
struct ConsoleListener {
    name: &'static str,
}

impl SpaceListener for ConsoleListener {
    fn on_index_changed(&self, index: usize, attributes: IndexAttributes) {
        info!(
            "[{}] index {} -> highlighted={} masked={}",
            self.name, index, attributes.highlighted, attributes.masked
        );
    }

    fn on_any_changed(&self) {
        info!("[{}] refresh", self.name);
    }

    fn on_reinitialized(&self) {
        info!("[{}] reinitialized", self.name);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let store = match args.next() {
        Some(path) => {
            let options = CsvOptions::with_row_names();
            Store::Flat(TabularStore::load_csv_file(&path, &options)?)
        }
        None => {
            info!("no CSV path given, generating a synthetic clustered dataset");
            Store::Clustered(ClusteredTabularStore::random(30, 4, 3))
        }
    };
    let store = Arc::new(store);

    let session = Session::new();
    session.event_bus().subscribe::<events::DatasetLoaded>(handler_from_fn(|event| {
        if let Some(loaded) = event.as_any().downcast_ref::<events::DatasetLoaded>() {
            info!("event: loaded '{}' ({} rows)", loaded.source_name, loaded.row_count);
        }
    }));

    session.load_dataset(store.clone() as Arc<dyn DataSet>);
    let space = session.space();

    let listener = Arc::new(ConsoleListener { name: "console" });
    space.add_listener(listener.clone());

    // Brush every third point, as a drag rectangle would.
    for index in (0..space.len()).step_by(3) {
        space.set_highlighted(index, true);
    }
    space.commit();
    info!("{} points highlighted", space.highlighted_count());

    // Hide everything outside the selection, then show it again.
    let mut masking = store.masking_policy();
    masking.toggle(&space);
    space.commit();
    info!(
        "masking={} nothing_masked={}",
        masking.is_masking(),
        masking.nothing_masked()
    );

    let exported = export_highlighted(store.table(), &space, true)?;
    println!("{exported}");

    masking.toggle(&space);
    space.commit();

    space.remove_listener(listener);
    Ok(())
}
