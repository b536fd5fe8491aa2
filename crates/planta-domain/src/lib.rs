mod document;
mod maintenance;
mod oee;
mod process;
mod product;
mod recipe;
mod stock;

pub use document::Document;
pub use maintenance::{Criticality, Equipment, MaintenanceKind, MaintenanceLog, MaintenanceTask, TaskStatus};
pub use oee::{availability, clamp, good_count, oee, performance, quality, run_time, OeeDerived, OeeInput, OeeRun};
pub use process::Process;
pub use product::{Product, StockStatus, Unit};
pub use recipe::{Recipe, RecipeItem};
pub use stock::{MovementKind, StockMovement};
