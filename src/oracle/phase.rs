use crate::structures::literal::CLiteral;

/// The polarity given to an atom when a decision is made on the atom.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PhaseSelection {
    /// The most recent value of the atom, if [phase saving](crate::config::Config::phase_saving) is enabled, and false otherwise.
    #[default]
    Original,

    /// The negation of the literal of the atom in the given model, indexed by atom - 1.
    ///
    /// As [Original](PhaseSelection::Original) for an atom whose entry is zero, or absent.
    ///
    /// Used to search for a model which differs from the given model on as many atoms as possible.
    Inverse(Vec<CLiteral>),

    /// A random polarity.
    Random,
}
