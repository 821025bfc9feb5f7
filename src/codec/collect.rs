use super::coerce::coerce;
use super::{PATH_SEPARATOR, PathValueMap};
use crate::error::CodecError;
use crate::value::CollectedParams;
use tracing::{debug, trace, warn};

/// Whether collection stops at the first failure or reports all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FailureMode {
    FailFast,
    Gather,
}

pub(super) fn collect_values(
    values: &PathValueMap,
    mode: FailureMode,
) -> Result<CollectedParams, CodecError> {
    let mut params = CollectedParams::new();
    let mut failures = Vec::new();
    let mut skipped = 0usize;

    for (path, input) in values.iter() {
        let raw = input.raw.trim();
        if raw.is_empty() {
            skipped += 1;
            continue;
        }

        let assigned = split_path(path)
            .and_then(|segments| {
                let value = coerce(path, raw, &input.leaf_type)?;
                Ok((segments, value))
            })
            .map(|(segments, value)| assign(&mut params, path, &segments, value));

        if let Err(error) = assigned {
            match mode {
                FailureMode::FailFast => return Err(error),
                FailureMode::Gather => failures.push(error),
            }
        }
    }

    debug!(
        supplied = values.len(),
        skipped,
        failed = failures.len(),
        top_level = params.len(),
        "collected parameter values"
    );

    if failures.is_empty() {
        Ok(params)
    } else {
        Err(CodecError::Multiple(failures))
    }
}

/// Splits a dotted path into its segments, rejecting empty paths and empty segments.
pub(super) fn split_path(path: &str) -> Result<Vec<&str>, CodecError> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(CodecError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

fn assign(
    params: &mut CollectedParams,
    path: &str,
    segments: &[&str],
    value: crate::value::ParamValue,
) {
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = params;
    for segment in parents {
        current = current.group_entry(segment);
    }

    trace!(path, value = %value, "assigned leaf");
    match current.insert(*leaf, value) {
        Some(previous) if previous.is_group() => {
            warn!(path, "nested group replaced by a leaf value")
        }
        Some(_) => debug!(path, "overwrote previously collected value"),
        None => {}
    }
}
