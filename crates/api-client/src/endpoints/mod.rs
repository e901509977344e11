//! Endpoint-specific API implementations
//!
//! | Module | Endpoint | Description |
//! |--------|----------|-------------|
//! | `foods` | `GET /foods/search` | Keyword food search with nutrient values |

pub mod foods;

pub use foods::FoodsApi;
