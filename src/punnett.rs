use crate::prelude::*;
use ndarray::Array2;

/// Probability of each cell of a Punnett square.
pub const CELL_PROBABILITY: Probability = 0.25;

/// The 2x2 grid of allele pairings two parents can pass on at one locus.
///
/// Rows are indexed by the first parent's allele, columns by the second's.
/// Homozygous parents still fill all four cells, so repeated pairs simply
/// appear more than once.
pub struct PunnettSquare {
    cells: Array2<AllelePair>,
}

impl PunnettSquare {
    pub fn new(locus: Locus, parent1: &Genotype, parent2: &Genotype) -> Self {
        let (p1, p2) = (&parent1[locus], &parent2[locus]);
        let gametes1: Vec<&str> = p1.iter().collect();
        let gametes2: Vec<&str> = p2.iter().collect();
        Self {
            cells: Array2::from_shape_fn((2, 2), |(i, j)| {
                AllelePair::new(gametes1[i], gametes2[j])
            }),
        }
    }

    /// Cells in row-major order, each with probability `CELL_PROBABILITY`.
    pub fn cells(&self) -> impl Iterator<Item = &AllelePair> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // Probability that a child receives `pair`, in either order.
    fn share(square: &PunnettSquare, locus: Locus, pair: &AllelePair) -> Probability {
        let wanted = pair.canonical(locus);
        square
            .cells()
            .filter(|cell| cell.canonical(locus) == wanted)
            .count() as Probability
            * CELL_PROBABILITY
    }

    fn parents() -> Result<(Genotype, Genotype), Box<dyn Error>> {
        Ok((
            "E:E/e A:Ay/at B:B/B D:D/d M:m/m S:n/n".parse()?,
            "E:E/e A:at/a B:b/b D:d/d M:m/m S:sp/n".parse()?,
        ))
    }

    #[test]
    fn test_square_has_four_cells() -> Result<(), Box<dyn Error>> {
        let (p1, p2) = parents()?;
        let square = PunnettSquare::new(Locus::A, &p1, &p2);
        let cells: Vec<String> = square.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["Ay/at", "Ay/a", "at/at", "at/a"]);
        Ok(())
    }

    #[test]
    fn test_heterozygous_cross_is_one_two_one() -> Result<(), Box<dyn Error>> {
        let (p1, p2) = parents()?;
        let square = PunnettSquare::new(Locus::E, &p1, &p2);
        assert_eq!(share(&square, Locus::E, &AllelePair::new("E", "E")), 0.25);
        assert_eq!(share(&square, Locus::E, &AllelePair::new("e", "E")), 0.5);
        assert_eq!(share(&square, Locus::E, &AllelePair::new("e", "e")), 0.25);
        Ok(())
    }

    #[test]
    fn test_homozygous_parents_fill_every_cell() -> Result<(), Box<dyn Error>> {
        let (p1, p2) = parents()?;
        let square = PunnettSquare::new(Locus::B, &p1, &p2);
        assert_eq!(square.cells().count(), 4);
        assert_eq!(share(&square, Locus::B, &AllelePair::new("B", "b")), 1.0);
        Ok(())
    }
}
