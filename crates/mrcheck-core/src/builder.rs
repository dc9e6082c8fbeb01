//! Object set construction from payload sources
//!
//! For each source: decompress, split into documents, decode each document
//! and insert it under its identity. Any failure aborts the whole build.

use crate::codec::{decompress, split_documents, ObjectDecoder, TypeRegistry};
use crate::errors::{ExError, VerifyError};
use crate::model::{ObjectSet, PayloadSource};
use serde::Deserialize;

/// What to do when two documents declare the same identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later document replaces the earlier one
    #[default]
    LastWriterWins,
    /// Fail the build with `DuplicateObject`
    Reject,
}

/// Builds an [`ObjectSet`] from payload sources
#[derive(Debug, Clone, Copy)]
pub struct ObjectSetBuilder<'r> {
    decoder: ObjectDecoder<'r>,
    collision_policy: CollisionPolicy,
}

impl<'r> ObjectSetBuilder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            decoder: ObjectDecoder::new(registry),
            collision_policy: CollisionPolicy::default(),
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Build a fresh set from all `sources`, in order
    ///
    /// # Errors
    ///
    /// Decode-class errors annotated with the offending source and data key,
    /// or `DuplicateObject` under [`CollisionPolicy::Reject`]. No partial set
    /// is returned.
    pub fn build<'s, I>(&self, sources: I) -> Result<ObjectSet, ExError>
    where
        I: IntoIterator<Item = &'s PayloadSource>,
    {
        let mut set = ObjectSet::new();
        for source in sources {
            self.extend_from_source(&mut set, source)?;
        }
        Ok(set)
    }

    /// Decode one source into `set`, returning the number of documents read
    pub fn extend_from_source(&self, set: &mut ObjectSet, source: &PayloadSource) -> Result<usize, ExError> {
        let bytes = decompress(&source.key, source.data.expose()).map_err(|e| at_source(e, source))?;
        let text = std::str::from_utf8(&bytes).map_err(|e| {
            at_source(
                ExError::from(VerifyError::MalformedDocument {
                    reason: format!("payload is not valid UTF-8: {}", e),
                }),
                source,
            )
        })?;

        let mut count = 0;
        for document in split_documents(text) {
            let object = self.decoder.decode(document).map_err(|e| at_source(e, source))?;
            let identity = object.identity();

            if self.collision_policy == CollisionPolicy::Reject && set.contains(&identity) {
                return Err(at_source(
                    ExError::from(VerifyError::DuplicateObject {
                        identity: identity.to_string(),
                    }),
                    source,
                ));
            }
            if set.insert(object).is_some() {
                tracing::warn!(
                    source = %source.source,
                    data_key = %source.key,
                    identity = %identity,
                    "object declared more than once, keeping the later document"
                );
            }
            count += 1;
        }
        Ok(count)
    }
}

fn at_source(err: ExError, source: &PayloadSource) -> ExError {
    err.with_source_ref(source.source.to_string())
        .with_data_key(source.key.as_str())
}
