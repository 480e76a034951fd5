//! Deserializers for data model types.

mod color;
