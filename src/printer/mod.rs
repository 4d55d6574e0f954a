//! Tree consumers.
//!
//! Both walk a program through the `Visitor` trait and never modify it:
//!
//! - pretty: Pascal source, one statement per line
//! - xml: an XML document with one element per node

pub mod pretty;
pub mod xml;
