//! Declaration-level verification
//!
//! [`ObjectsMatcher`] fetches every payload source of a declaration, builds
//! the available object set and diffs it against the expected set. Logical
//! differences are reported through [`VerificationOutcome`]; only fetch,
//! decode and cancellation failures are errors.

use crate::builder::ObjectSetBuilder;
use crate::codec::TypeRegistry;
use crate::diff::{compute_diff, report, DiffResult};
use crate::errors::ExError;
use crate::model::{Declaration, DeclarationRef, ObjectSet, PayloadSource};
use crate::verify::cancel::CancelToken;
use crate::verify::fetcher::PayloadFetcher;
use crate::verify::options::VerifyOptions;
use crate::{log_op_end, log_op_error, log_op_start};
use mrcheck_core_types::{RequestContext, TraceId};
use std::time::Instant;

/// Result of one verification call
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    pub declaration: DeclarationRef,
    /// Objects decoded from the declaration's payloads
    pub available_count: usize,
    pub expected_count: usize,
    pub diff: DiffResult,
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        self.diff.is_success()
    }

    /// Diagnostic for a caller that expected the sets to match
    pub fn failure_message(&self) -> String {
        report::render(self, false)
    }

    /// Diagnostic for a caller that expected the sets not to match
    pub fn negated_failure_message(&self) -> String {
        report::render(self, true)
    }

    /// Panic with the failure message unless the sets matched
    #[track_caller]
    pub fn assert_matched(&self) {
        assert!(self.is_success(), "{}", self.failure_message());
    }

    /// Panic with the negated message if the sets matched
    #[track_caller]
    pub fn assert_not_matched(&self) {
        assert!(!self.is_success(), "{}", self.negated_failure_message());
    }
}

/// Verifies declarations against a fixed expected object set
///
/// Holds no per-call state: every call builds its own available set and
/// diff, so one matcher can be reused (and shared across threads when the
/// fetcher allows it).
#[derive(Debug)]
pub struct ObjectsMatcher<F> {
    fetcher: F,
    registry: TypeRegistry,
    expected: ObjectSet,
    options: VerifyOptions,
    trace_id: Option<TraceId>,
}

impl<F: PayloadFetcher> ObjectsMatcher<F> {
    pub fn new(fetcher: F, registry: TypeRegistry, expected: ObjectSet, options: VerifyOptions) -> Self {
        Self {
            fetcher,
            registry,
            expected,
            options,
            trace_id: None,
        }
    }

    /// Tag every call's log events with a caller-chosen trace id
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    pub fn expected(&self) -> &ObjectSet {
        &self.expected
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }

    /// Resolve `reference` and verify its payloads
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing declaration or source, any decode-class
    /// error, or `Cancelled`/`Timeout` from `cancel`.
    pub fn verify(&self, reference: &DeclarationRef, cancel: &CancelToken) -> Result<VerificationOutcome, ExError> {
        self.instrumented("verify", reference, |ctx| {
            cancel.check("fetch_declaration")?;
            let declaration = self.fetcher.fetch_declaration(reference, cancel)?;
            self.evaluate(&declaration, cancel, ctx)
        })
    }

    /// Verify an already-resolved declaration
    ///
    /// # Errors
    ///
    /// As [`verify`](Self::verify), minus declaration lookup.
    pub fn verify_declaration(&self, declaration: &Declaration, cancel: &CancelToken) -> Result<VerificationOutcome, ExError> {
        self.instrumented("verify_declaration", &declaration.reference, |ctx| {
            self.evaluate(declaration, cancel, ctx)
        })
    }

    fn instrumented<R>(&self, op: &str, reference: &DeclarationRef, run: R) -> Result<VerificationOutcome, ExError>
    where
        R: FnOnce(&RequestContext) -> Result<VerificationOutcome, ExError>,
    {
        let ctx = match &self.trace_id {
            Some(trace_id) => RequestContext::new().with_trace_id(trace_id.clone()),
            None => RequestContext::new(),
        };
        let trace_id = ctx.trace_id.as_ref().map(TraceId::as_str);
        let start = Instant::now();
        log_op_start!(
            op,
            namespace = %reference.namespace,
            name = %reference.name,
            request_id = %ctx.request_id,
            trace_id = trace_id
        );

        let result = run(&ctx).map_err(|e| e.with_request_id(ctx.request_id.clone()));
        let duration_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(outcome) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    request_id = %ctx.request_id,
                    trace_id = trace_id,
                    object_count = outcome.available_count,
                    mismatch_count = outcome.diff.mismatches.len(),
                    missing_count = outcome.diff.missing.len(),
                    extra_count = outcome.diff.extra.len(),
                    success = outcome.is_success()
                );
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err,
                    duration_ms = duration_ms,
                    request_id = %ctx.request_id,
                    trace_id = trace_id
                );
            }
        }
        result
    }

    fn evaluate(&self, declaration: &Declaration, cancel: &CancelToken, ctx: &RequestContext) -> Result<VerificationOutcome, ExError> {
        let mut payloads: Vec<PayloadSource> = Vec::new();
        for source in &declaration.source_refs {
            cancel.check("fetch_source")?;
            let entries = self.fetcher.fetch_source(source, cancel)?;
            tracing::debug!(
                request_id = %ctx.request_id,
                source = %source,
                entry_count = entries.len(),
                "fetched payload source"
            );
            payloads.extend(entries);
        }

        cancel.check("build_object_set")?;
        let available = ObjectSetBuilder::new(&self.registry)
            .with_collision_policy(self.options.collision_policy)
            .build(&payloads)?;

        cancel.check("compute_diff")?;
        let diff = compute_diff(&available, &self.expected, self.options.diff_options());

        Ok(VerificationOutcome {
            declaration: declaration.reference.clone(),
            available_count: available.len(),
            expected_count: self.expected.len(),
            diff,
        })
    }
}
