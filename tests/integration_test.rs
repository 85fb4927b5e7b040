//! End-to-end tests of the network engine through the public API

use approx::{assert_abs_diff_eq, assert_relative_eq};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_nn::{mse_loss, Activation, Matrix, NetError, Network, Trainer, TrainingConfig};

fn seeded(sizes: &[usize], activation: &str, seed: u64) -> Network {
    Network::with_rng(sizes, activation, &mut StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn test_single_unit_worked_example() {
    let mut net = Network::from_parameters(
        &[1, 1],
        "None",
        vec![Matrix::new(vec![2.0], 1, 1).unwrap()],
        vec![vec![0.5]],
    )
    .unwrap();

    let trace = net.forward(&[3.0]).unwrap();
    assert_eq!(trace.a[1][0], 6.5);
    assert_eq!(mse_loss(trace.output(), &[5.0]).unwrap(), 2.25);

    let grad = net.backprop(&[3.0], &[5.0]).unwrap();
    assert_eq!(grad.loss, 2.25);
    assert_eq!(grad.biases[0][0], 1.5);
    assert_eq!(grad.weights[0].get(0, 0), Some(4.5));

    net.apply_gradients(&grad.weights, &grad.biases, 0.1).unwrap();
    assert_relative_eq!(net.weight(0, 0, 0).unwrap(), 1.55, epsilon = 1e-12);
    assert_relative_eq!(net.bias(0, 0).unwrap(), 0.35, epsilon = 1e-12);
}

#[test]
fn test_no_hidden_layer_gradients_match_direct_formulas() {
    let net = seeded(&[3, 2], "Sigmoid", 11);
    let input = [0.4, -1.2, 0.9];
    let target = [0.1, 0.7];

    let grad = net.backprop(&input, &target).unwrap();
    let trace = net.forward(&input).unwrap();
    let act = Activation::Sigmoid;

    assert_eq!(grad.weights.len(), 1);
    for i in 0..2 {
        let delta = (trace.a[1][i] - target[i]) * act.df(trace.z[0][i]);
        assert_relative_eq!(grad.biases[0][i], delta);
        for j in 0..3 {
            assert_relative_eq!(grad.weights[0].get(i, j).unwrap(), delta * input[j]);
        }
    }
}

/// Central-difference check of every parameter.
///
/// Backprop returns the gradient of ½ Σ (o - t)^2, which is `n / 2` times the
/// gradient of the mean squared error over `n` outputs.
fn check_gradients(net: &Network, input: &[f64], target: &[f64]) {
    let eps = 1e-5;
    let grad = net.backprop(input, target).unwrap();
    let scale = net.output_size() as f64 / 2.0;

    for l in 0..net.num_transitions() {
        let [rows, cols] = net.weights()[l].shape();
        for i in 0..rows {
            for j in 0..cols {
                let w = net.weight(l, i, j).unwrap();
                let mut plus = net.clone();
                plus.set_weight(l, i, j, w + eps).unwrap();
                let mut minus = net.clone();
                minus.set_weight(l, i, j, w - eps).unwrap();
                let numeric = (plus.loss(input, target).unwrap()
                    - minus.loss(input, target).unwrap())
                    / (2.0 * eps);
                assert_abs_diff_eq!(
                    grad.weights[l].get(i, j).unwrap(),
                    numeric * scale,
                    epsilon = 1e-6
                );
            }
            let b = net.bias(l, i).unwrap();
            let mut plus = net.clone();
            plus.set_bias(l, i, b + eps).unwrap();
            let mut minus = net.clone();
            minus.set_bias(l, i, b - eps).unwrap();
            let numeric = (plus.loss(input, target).unwrap() - minus.loss(input, target).unwrap())
                / (2.0 * eps);
            assert_abs_diff_eq!(grad.biases[l][i], numeric * scale, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_numerical_gradient_sigmoid_2_3_1() {
    let net = seeded(&[2, 3, 1], "Sigmoid", 3);
    check_gradients(&net, &[0.7, -0.3], &[0.9]);
}

#[test]
fn test_numerical_gradient_deep_identity() {
    let net = seeded(&[3, 4, 3, 2], "None", 5);
    check_gradients(&net, &[1.0, -0.5, 0.25], &[0.3, -0.8]);
}

#[test]
fn test_unknown_activation_behaves_as_sigmoid() {
    let swish = seeded(&[2, 3, 1], "Swish", 21);
    let sigmoid = seeded(&[2, 3, 1], "Sigmoid", 21);

    assert_eq!(swish.activation(), Activation::Sigmoid);
    assert_eq!(swish.weights(), sigmoid.weights());
    for z in [-2.0, -0.5, 0.0, 0.5, 2.0] {
        assert_eq!(swish.activation().f(z), Activation::Sigmoid.f(z));
        assert_eq!(swish.activation().df(z), Activation::Sigmoid.df(z));
    }

    let input = [0.2, 0.8];
    let target = [0.5];
    assert_eq!(swish.forward(&input).unwrap(), sigmoid.forward(&input).unwrap());
    let a = swish.backprop(&input, &target).unwrap();
    let b = sigmoid.backprop(&input, &target).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_shape_errors_at_the_boundary() {
    let net = seeded(&[2, 3, 1], "ReLU", 1);
    assert_eq!(
        net.forward(&[1.0]).unwrap_err(),
        NetError::ShapeMismatch {
            what: "input",
            expected: 2,
            actual: 1
        }
    );
    assert!(matches!(
        net.backprop(&[1.0, 2.0], &[1.0, 2.0]),
        Err(NetError::ShapeMismatch { what: "target", .. })
    ));
    assert!(matches!(
        mse_loss(&[1.0], &[1.0, 2.0]),
        Err(NetError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        Network::new(&[3], "ReLU"),
        Err(NetError::InvalidArchitecture(_))
    ));
}

#[test]
fn test_initial_parameters_on_grid() {
    let net = Network::new(&[4, 8, 3], "ReLU").unwrap();
    let values = net
        .weights()
        .iter()
        .flat_map(|w| w.data().iter().copied())
        .chain(net.biases().iter().flatten().copied());
    for v in values {
        assert!((-1.0..=1.0).contains(&v));
        assert_abs_diff_eq!(v * 10.0, (v * 10.0).round(), epsilon = 1e-9);
    }
}

#[test]
fn test_training_reduces_loss() {
    let config = TrainingConfig::default()
        .with_hidden_sizes(vec![3])
        .with_learning_rate(0.5)
        .with_sample(vec![1.0, 0.5], vec![0.8]);
    let mut trainer = Trainer::new(seeded(&config.layer_sizes(), "Sigmoid", 8), 0.5);

    trainer
        .train_step(&config.inputs, &config.targets, 500)
        .unwrap();

    let history = trainer.loss_history();
    assert_eq!(history.len(), 500);
    assert!(history[499] < history[0]);
    assert!(history[499] < 1e-3);
}

#[test]
fn test_edge_inspection_reads_live_weights() {
    let mut net = seeded(&[2, 2, 1], "None", 2);
    net.set_weight(1, 0, 1, 0.123456789).unwrap();
    let inspection = net.inspect(1, 0, 1).unwrap();
    assert_eq!(inspection.weight, 0.123456789);
    assert_eq!(inspection.row.len(), 2);
    assert!(inspection.to_string().contains("weight: 0.123457"));
}

proptest! {
    #[test]
    fn prop_loss_is_symmetric(pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..16)) {
        let (o, t): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        prop_assert_eq!(mse_loss(&o, &t).unwrap(), mse_loss(&t, &o).unwrap());
    }

    #[test]
    fn prop_forward_is_deterministic(
        seed in any::<u64>(),
        input in prop::collection::vec(-5.0f64..5.0, 3),
        act in prop::sample::select(vec!["None", "Sigmoid", "ReLU"]),
    ) {
        let net = seeded(&[3, 4, 2], act, seed);
        let first = net.forward(&input).unwrap();
        let second = net.forward(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_zero_learning_rate_is_a_no_op(
        seed in any::<u64>(),
        input in prop::collection::vec(-5.0f64..5.0, 2),
        target in -2.0f64..2.0,
    ) {
        let mut net = seeded(&[2, 3, 1], "Sigmoid", seed);
        let before = net.clone();
        let grad = net.backprop(&input, &[target]).unwrap();
        net.apply_gradient(&grad, 0.0).unwrap();
        prop_assert_eq!(net, before);
    }
}
