use crate::error::{Result, SnakeError};
use crate::game_input::{INPUTS, Stimuli};
use crate::snake::Move;

pub const HIDDEN: usize = 16;
pub const OUTPUTS: usize = 3;

const LAYER1_LEN: usize = HIDDEN * (INPUTS + 1);
const LAYER2_LEN: usize = OUTPUTS * (HIDDEN + 1);

/// Two-layer perceptron over a borrowed flat weight vector.
///
/// The vector holds the input->hidden matrix first, then hidden->output.
/// Both are row-major with one row per neuron and the bias as the last
/// column of its row.
#[derive(Copy, Clone, Debug)]
pub struct Brain<'a> {
    layer1: &'a [f32],
    layer2: &'a [f32],
}

impl<'a> Brain<'a> {
    pub fn new(weights: &'a [f32]) -> Result<Self> {
        if weights.is_empty() {
            return Err(SnakeError::invalid("parameters", "vector is empty"));
        }
        if weights.len() != Brain::total_weights() {
            return Err(SnakeError::ShapeMismatch {
                expected: Brain::total_weights(),
                actual: weights.len(),
            });
        }
        let (layer1, layer2) = weights.split_at(LAYER1_LEN);
        Ok(Self { layer1, layer2 })
    }

    ///return the total number of weights required by the network
    pub const fn total_weights() -> usize {
        LAYER1_LEN + LAYER2_LEN
    }

    pub fn forward(&self, input: &Stimuli) -> [f32; OUTPUTS] {
        let mut hidden = [0.0f32; HIDDEN];
        for (h, row) in hidden.iter_mut().zip(self.layer1.chunks_exact(INPUTS + 1)) {
            let sum: f32 = row[..INPUTS].iter().zip(input).map(|(w, x)| w * x).sum();
            *h = (sum + row[INPUTS]).tanh();
        }

        let mut output = [0.0f32; OUTPUTS];
        for (o, row) in output.iter_mut().zip(self.layer2.chunks_exact(HIDDEN + 1)) {
            let sum: f32 = row[..HIDDEN].iter().zip(&hidden).map(|(w, h)| w * h).sum();
            *o = sum + row[HIDDEN];
        }
        output
    }

    pub fn decide(&self, input: &Stimuli) -> Move {
        let best = argmax(&self.forward(input));
        Move::from_index(best).unwrap_or(Move::Continue)
    }
}

/// Index of the largest value; the lowest index wins ties.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for i in 1..values.len() {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_approx_eq(a: &[f32], b: &[f32]) {
        let tolerance = 1e-5;
        assert_eq!(a.len(), b.len(), "vectors have different lengths");
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            assert!((x - y).abs() < tolerance, "mismatch at index {}: {} vs {}", i, x, y);
        }
    }

    #[test]
    fn test_total_weights() {
        assert_eq!(Brain::total_weights(), 16 * 10 + 3 * 17);
    }

    #[test]
    fn test_shape_mismatch() {
        let short = vec![0.0; Brain::total_weights() - 1];
        assert_eq!(
            Brain::new(&short).unwrap_err(),
            SnakeError::ShapeMismatch { expected: 211, actual: 210 }
        );
        let long = vec![0.0; Brain::total_weights() + 1];
        assert!(matches!(Brain::new(&long), Err(SnakeError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_empty_vector_is_invalid_config() {
        assert!(matches!(Brain::new(&[]), Err(SnakeError::InvalidConfig { .. })));
    }

    #[test]
    fn test_argmax_ties_pick_lowest_index() {
        assert_eq!(argmax(&[1.0, 1.0, 0.5]), 0);
        assert_eq!(argmax(&[0.0, 2.0, 2.0]), 1);
        assert_eq!(argmax(&[3.0, 3.0, 3.0]), 0);
        assert_eq!(argmax(&[-1.0, -2.0, 0.0]), 2);
    }

    #[test]
    fn test_zero_weights_continue() {
        // all outputs tie at zero
        let weights = vec![0.0; Brain::total_weights()];
        let brain = Brain::new(&weights).unwrap();
        assert_eq!(brain.forward(&[1.0; INPUTS]), [0.0; OUTPUTS]);
        assert_eq!(brain.decide(&[1.0; INPUTS]), Move::Left);
    }

    #[test]
    fn test_output_bias_selects_move() {
        let mut weights = vec![0.0; Brain::total_weights()];
        // bias of output neuron 2 (Right)
        weights[LAYER1_LEN + 2 * (HIDDEN + 1) + HIDDEN] = 1.0;
        let brain = Brain::new(&weights).unwrap();
        assert_eq!(brain.decide(&[0.0; INPUTS]), Move::Right);
    }

    #[test]
    fn test_forward_by_hand() {
        let mut weights = vec![0.0; Brain::total_weights()];
        // hidden 0 reads input 4 with weight 0.5 and bias -1
        weights[4] = 0.5;
        weights[INPUTS] = -1.0;
        // output 1 reads hidden 0 with weight 2, output 0 has bias 0.1
        weights[LAYER1_LEN + (HIDDEN + 1)] = 2.0;
        weights[LAYER1_LEN + HIDDEN] = 0.1;

        let mut input = [0.0; INPUTS];
        input[4] = 6.0;
        let h0 = (0.5f32 * 6.0 - 1.0).tanh();
        let brain = Brain::new(&weights).unwrap();
        assert_vec_approx_eq(&brain.forward(&input), &[0.1, 2.0 * h0, 0.0]);
        assert_eq!(brain.decide(&input), Move::Continue);
    }
}
