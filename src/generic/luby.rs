/*!
An iterator over the luby sequence, used to schedule restarts of the [oracle](crate::oracle).

See <https://oeis.org/A182105> for details on the luby sequence.

The iterator tracks a pair: the count of completed 'runs' and the current element.
Each run doubles from 1 until the current element equals the lowest set bit of the count of runs, at which point a fresh run begins.
*/

/// Representation used for numbers in a luby sequence.
pub type LubyRepresentation = u32;

/// The state of the iterator.
pub struct Luby {
    runs: LubyRepresentation,
    element: LubyRepresentation,
}

// The default iterator is positioned on the first element of the sequence.
impl Default for Luby {
    fn default() -> Self {
        let mut luby = Luby {
            runs: 0,
            element: 0,
        };
        luby.next();
        luby
    }
}

impl Iterator for Luby {
    type Item = LubyRepresentation;

    fn next(&mut self) -> Option<Self::Item> {
        match self.runs & self.runs.wrapping_neg() == self.element {
            true => {
                self.runs = self.runs.checked_add(1)?;
                self.element = 1;
            }
            false => self.element = self.element.checked_add(self.element)?,
        }

        Some(self.element)
    }
}

impl Luby {
    /// The current element of the sequence.
    pub fn current(&self) -> LubyRepresentation {
        self.element
    }
}
