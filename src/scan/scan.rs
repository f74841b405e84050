use std::fmt;

use sha2::{Digest, Sha256};

use crate::types::value::hash_str;
use crate::types::{ParamSet, ParamValue, ScanFingerprint};

use super::expansion::ScanIter;
use super::joint::JointGroup;
use super::repeats::RepeatRule;
use super::ScanError;

type BoxedRule = Box<dyn RepeatRule + Send + Sync>;

/// A parameter scan.
///
/// Combinatorial parameters each contribute one axis, in the order they were
/// added. Every joint group contributes one more axis after them. The scan
/// visits the cartesian product of all axes, last axis fastest, running each
/// combination `default_repeats` times unless a repeat rule says otherwise.
pub struct Scan {
    default_repeats: usize,
    rules: Vec<BoxedRule>,
    comb_params: Vec<(String, Vec<ParamValue>)>,
    joint_params: Vec<JointGroup>,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            default_repeats: 1,
            rules: Vec::new(),
            comb_params: Vec::new(),
            joint_params: Vec::new(),
        }
    }
}

impl fmt::Debug for Scan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scan")
            .field("default_repeats", &self.default_repeats)
            .field("rules", &self.rules.len())
            .field("comb_params", &self.comb_params)
            .field("joint_params", &self.joint_params)
            .finish()
    }
}

impl Scan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scan from named value lists, grouping the names in each of
    /// `joint_lists` into a joint group. Everything else varies
    /// combinatorially.
    pub fn from_params<K, P, J, S>(params: P, joint_lists: J) -> Result<Self, ScanError>
    where
        K: Into<String>,
        P: IntoIterator<Item = (K, Vec<ParamValue>)>,
        J: IntoIterator,
        J::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = Scan::new();
        scan.add_params(params)?;

        for jlist in joint_lists {
            let mut members: Vec<(String, Vec<ParamValue>)> = Vec::new();
            for name in jlist {
                let name = name.as_ref();
                if members.iter().any(|(n, _)| n == name) || scan.joint_group_of(name).is_some() {
                    return Err(ScanError::DuplicateJointParameter(name.to_string()));
                }
                let idx = scan
                    .comb_index(name)
                    .ok_or_else(|| ScanError::UnknownParameter(name.to_string()))?;
                members.push(scan.comb_params.remove(idx));
            }
            scan.joint_params.push(JointGroup::new(members)?);
        }

        tracing::debug!(
            comb = scan.comb_params.len(),
            joint = scan.joint_params.len(),
            "Scan constructed"
        );

        Ok(scan)
    }

    pub fn with_default_repeats(mut self, repeats: usize) -> Self {
        self.default_repeats = repeats;
        self
    }

    pub fn set_default_repeats(&mut self, repeats: usize) {
        self.default_repeats = repeats;
    }

    pub fn default_repeats(&self) -> usize {
        self.default_repeats
    }

    /// Add or replace combinatorial parameters.
    ///
    /// A replaced parameter keeps its axis position; new ones are appended.
    /// Nothing is changed if any name already varies jointly.
    pub fn add_params<K, P>(&mut self, params: P) -> Result<(), ScanError>
    where
        K: Into<String>,
        P: IntoIterator<Item = (K, Vec<ParamValue>)>,
    {
        let params: Vec<(String, Vec<ParamValue>)> =
            params.into_iter().map(|(k, v)| (k.into(), v)).collect();

        if let Some((name, _)) = params.iter().find(|(n, _)| self.joint_group_of(n).is_some()) {
            return Err(ScanError::ParameterIsJoint(name.clone()));
        }

        for (name, values) in params {
            match self.comb_index(&name) {
                Some(idx) => self.comb_params[idx].1 = values,
                None => self.comb_params.push((name, values)),
            }
        }
        Ok(())
    }

    /// Add a single fixed value. Shorthand for a one-element axis.
    pub fn add_scalar(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Result<(), ScanError> {
        self.add_params([(name.into(), vec![value.into()])])
    }

    /// Add a group of jointly varying parameters.
    ///
    /// Members that were combinatorial move into the group. A member that
    /// already belongs to another group is an error.
    pub fn add_joint(&mut self, group: JointGroup) -> Result<(), ScanError> {
        if let Some(name) = group.names().find(|n| self.joint_group_of(n).is_some()) {
            return Err(ScanError::DuplicateJointParameter(name.to_string()));
        }

        self.comb_params.retain(|(n, _)| !group.contains(n));
        self.joint_params.push(group);
        Ok(())
    }

    /// Append a repeat-count closure. Rules run in the order they were added;
    /// the last one returning a positive count wins.
    pub fn add_count<F>(&mut self, count: F)
    where
        F: Fn(&ParamSet) -> Option<usize> + Send + Sync + 'static,
    {
        self.add_rule(count);
    }

    pub fn add_rule<R>(&mut self, rule: R)
    where
        R: RepeatRule + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
    }

    pub fn comb_params(&self) -> &[(String, Vec<ParamValue>)] {
        &self.comb_params
    }

    pub fn joint_groups(&self) -> &[JointGroup] {
        &self.joint_params
    }

    /// Sizes of every axis: combinatorial parameters first, then joint groups.
    pub fn axis_sizes(&self) -> Vec<usize> {
        self.comb_params
            .iter()
            .map(|(_, v)| v.len())
            .chain(self.joint_params.iter().map(JointGroup::size))
            .collect()
    }

    /// Number of distinct combinations, ignoring repeats.
    ///
    /// One for a scan with no parameters, zero if any axis is empty.
    pub fn combination_count(&self) -> usize {
        self.axis_sizes()
            .into_iter()
            .fold(1usize, |acc, n| acc.saturating_mul(n))
    }

    /// How many times `params` should be run.
    pub fn repeat_count(&self, params: &ParamSet) -> usize {
        let mut repeats = self.default_repeats;
        for rule in &self.rules {
            match rule.repeats(params) {
                Some(n) if n > 0 => repeats = n,
                _ => {}
            }
        }
        repeats
    }

    /// Every requested run, in scan order.
    pub fn params(&self) -> ScanIter<'_> {
        ScanIter::new(self)
    }

    /// Call `f` once per requested run.
    pub fn run<F>(&self, mut f: F)
    where
        F: FnMut(&ParamSet),
    {
        for point in self.params() {
            f(&point.params);
        }
    }

    /// Like [`Scan::run`], stopping at the first error. Returns the number of
    /// runs completed.
    pub fn try_run<F, E>(&self, mut f: F) -> Result<usize, E>
    where
        F: FnMut(&ParamSet) -> Result<(), E>,
    {
        let mut executed = 0;
        for point in self.params() {
            f(&point.params)?;
            executed += 1;
        }
        Ok(executed)
    }

    pub fn fingerprint(&self) -> ScanFingerprint {
        let mut hasher = Sha256::new();
        hasher.update((self.default_repeats as u64).to_le_bytes());

        hasher.update((self.comb_params.len() as u64).to_le_bytes());
        for (name, values) in &self.comb_params {
            hash_axis(&mut hasher, name, values);
        }

        hasher.update((self.joint_params.len() as u64).to_le_bytes());
        for group in &self.joint_params {
            hasher.update((group.params().len() as u64).to_le_bytes());
            for (name, values) in group.params() {
                hash_axis(&mut hasher, name, values);
            }
        }

        ScanFingerprint::from_hasher(hasher)
    }

    fn comb_index(&self, name: &str) -> Option<usize> {
        self.comb_params.iter().position(|(n, _)| n == name)
    }

    fn joint_group_of(&self, name: &str) -> Option<usize> {
        self.joint_params.iter().position(|g| g.contains(name))
    }
}

fn hash_axis(hasher: &mut Sha256, name: &str, values: &[ParamValue]) {
    hash_str(hasher, name);
    hasher.update((values.len() as u64).to_le_bytes());
    for v in values {
        v.hash_into(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::value::values;

    #[test]
    fn replaced_param_keeps_axis_position() {
        let mut scan = Scan::new();
        scan.add_params([("x", values([1, 2])), ("y", values([3]))]).unwrap();
        scan.add_params([("x", values([7, 8, 9]))]).unwrap();

        let names: Vec<&str> = scan.comb_params().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(scan.axis_sizes(), vec![3, 1]);
    }

    #[test]
    fn add_params_is_all_or_nothing() {
        let mut scan = Scan::from_params(
            [("a", values([1, 2])), ("b", values([3, 4]))],
            [["a", "b"]],
        )
        .unwrap();

        let err = scan
            .add_params([("z", values([0])), ("a", values([5]))])
            .unwrap_err();
        assert_eq!(err, ScanError::ParameterIsJoint("a".into()));
        assert!(scan.comb_params().is_empty());
    }

    #[test]
    fn fingerprint_tracks_shape_not_rules() {
        let mut a = Scan::new();
        a.add_params([("x", values([1, 2]))]).unwrap();
        let mut b = Scan::new();
        b.add_params([("x", values([1, 2]))]).unwrap();
        b.add_count(|_| Some(3));
        assert_eq!(a.fingerprint(), b.fingerprint());

        b.set_default_repeats(2);
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
