use crate::error::Result;
use crate::geometry::coords;
use crate::model::{ScaleFactors, Size};

/// Reference geometry of one map, captured once at attach time.
///
/// Every scaling pass starts from these strings, never from previously scaled
/// output, so repeated resizes cannot accumulate rounding error.
#[derive(Clone, Debug, Default)]
pub struct GeometryStore {
    reference: Vec<String>,          // normalized csv per region, by position
    reference_size: Option<Size>,    // intrinsic image size seen at capture
}

impl GeometryStore {
    pub fn capture<I, S>(raw_coords: I, reference_size: Option<Size>) -> GeometryStore
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let reference = raw_coords.into_iter().map(|c| coords::normalize(c.as_ref())).collect();
        GeometryStore { reference, reference_size }
    }

    pub fn reference_coords(&self) -> &[String] { &self.reference }
    pub fn reference_size(&self) -> Option<Size> { self.reference_size }
    pub fn len(&self) -> usize { self.reference.len() }
    pub fn is_empty(&self) -> bool { self.reference.is_empty() }

    /// Late capture of the intrinsic size for maps attached before their image existed.
    pub(crate) fn note_reference_size(&mut self, size: Size) {
        if self.reference_size.is_none() { self.reference_size = Some(size); }
    }

    /// Scale every region. All-or-nothing: the first malformed region aborts the pass.
    pub fn scale_all(&self, factors: ScaleFactors) -> Result<Vec<String>> {
        self.reference
            .iter()
            .enumerate()
            .map(|(i, r)| Ok(coords::format(&coords::scale_values(&coords::parse(r, i)?, factors))))
            .collect()
    }
}
