use crate::types::ParamValue;

use super::ScanError;

/// Parameters that vary together, index by index.
///
/// All members hold the same number of values; the group contributes a
/// single axis of that size to the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct JointGroup {
    params: Vec<(String, Vec<ParamValue>)>,
    size: usize,
}

impl JointGroup {
    pub fn new<K, I>(params: I) -> Result<Self, ScanError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<ParamValue>)>,
    {
        let mut members: Vec<(String, Vec<ParamValue>)> = Vec::new();
        for (name, values) in params {
            let name = name.into();
            if members.iter().any(|(n, _)| *n == name) {
                return Err(ScanError::DuplicateJointParameter(name));
            }
            members.push((name, values));
        }

        let size = check_joint_params(&members)?;

        Ok(JointGroup {
            params: members,
            size,
        })
    }

    /// Number of values every member takes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(n, _)| n.as_str())
    }

    pub fn params(&self) -> &[(String, Vec<ParamValue>)] {
        &self.params
    }
}

/// Returns the shared size, or the first member whose size differs from the
/// first member's.
fn check_joint_params(params: &[(String, Vec<ParamValue>)]) -> Result<usize, ScanError> {
    let (first, first_values) = params.first().ok_or(ScanError::EmptyJointGroup)?;
    let first_size = first_values.len();

    if let Some((param, values)) = params.iter().find(|(_, v)| v.len() != first_size) {
        return Err(ScanError::JointParameterListSize {
            param: param.clone(),
            first: first.clone(),
            size: values.len(),
            first_size,
        });
    }

    Ok(first_size)
}
