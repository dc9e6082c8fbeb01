//! Payload codec: decompression, document splitting and typed decoding

pub mod compression;
pub mod decoder;
pub mod registry;
pub mod split;

pub use compression::{compress, decompress, is_compressed_key, COMPRESSION_SUFFIX};
pub use decoder::ObjectDecoder;
pub use registry::{KindDecoder, KindShape, TypeRegistry};
pub use split::{split_documents, DOCUMENT_SEPARATOR};
