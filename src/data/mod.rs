//! Data layer: table model, loading, and the view engines.
//!
//! Architecture:
//! ```text
//!  pasted / dropped / opened text
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  delimiter detection, CSV parse → rows
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model    │  Table (header + data rows)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐     ┌──────────┐
//!   │  filter   │ ──▶ │   sort    │  → displayed row indices
//!   └──────────┘     └──────────┘
//!        │
//!        ▼
//!   highlight (render)   normalize (copy)
//! ```

pub mod filter;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod sort;
