pub mod client;
pub mod error;
pub mod schema;
pub mod transport;
pub use client::SchemaClient;
pub use error::{ ElementKind, SchemaError, TransportError };
pub use schema::{ CopyFieldSpec, FieldSpec, FieldTypeSpec };
pub use transport::{ ConnectionInfo, HttpTransport, RequestMethod, Transport };
