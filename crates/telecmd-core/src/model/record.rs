/// A tokenised batch line: leading command code plus its numeric fields
///
/// Produced by the batch reader, consumed by the dispatcher. The record
/// carries no meaning for the codes themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the batch source
    pub line: usize,
    pub code: u32,
    pub fields: Vec<u32>,
}

impl Record {
    pub fn new(line: usize, code: u32, fields: Vec<u32>) -> Self {
        Self { line, code, fields }
    }

    /// Field at `position` (0-based, after the code)
    pub fn field(&self, position: usize) -> Option<u32> {
        self.fields.get(position).copied()
    }
}
