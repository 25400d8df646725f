use super::*;
use approx::assert_abs_diff_eq;

fn gram_matrix(param: &RandomParameter, npoints: usize) -> Vec<Vec<f64>> {
    let rule = param.quadrature(npoints).unwrap();
    (0..npoints)
        .map(|i| {
            (0..npoints)
                .map(|j| {
                    (0..rule.len())
                        .map(|q| rule.w[q] * param.basis(rule.z[q], i) * param.basis(rule.z[q], j))
                        .sum()
                })
                .collect()
        })
        .collect()
}

fn assert_orthonormal(param: &RandomParameter, npoints: usize, tol: f64) {
    let gram = gram_matrix(param, npoints);
    for i in 0..npoints {
        for j in 0..npoints {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(gram[i][j], expected, epsilon = tol);
        }
    }
}

#[test]
fn test_normal_orthonormality() {
    let param = RandomParameter::new(0, Distribution::Normal { mu: -4.0, sigma: 0.5 }, 3).unwrap();
    for n in 1..=10 {
        assert_orthonormal(&param, n, 1e-10);
    }
}

#[test]
fn test_uniform_orthonormality() {
    let param = RandomParameter::new(0, Distribution::Uniform { a: -5.0, b: 4.0 }, 3).unwrap();
    for n in 1..=10 {
        assert_orthonormal(&param, n, 1e-11);
    }
}

#[test]
fn test_exponential_orthonormality() {
    let param =
        RandomParameter::new(0, Distribution::Exponential { mu: 6.0, beta: 1.0 }, 3).unwrap();
    for n in 1..=8 {
        assert_orthonormal(&param, n, 1e-8);
    }
}

#[test]
fn test_orthonormality_at_high_orders() {
    let params = [
        RandomParameter::new(0, Distribution::Normal { mu: 1.0, sigma: 2.0 }, 10).unwrap(),
        RandomParameter::new(0, Distribution::Uniform { a: -5.0, b: 4.0 }, 10).unwrap(),
        RandomParameter::new(0, Distribution::Exponential { mu: 0.0, beta: 1.0 }, 10).unwrap(),
    ];
    for param in &params {
        for npoints in [30, 64] {
            let rule = param.quadrature(npoints).unwrap();
            assert!(rule.w.iter().all(|&w| w >= 0.0));
            for i in 0..=10 {
                for j in 0..=10 {
                    let gram: f64 = (0..rule.len())
                        .map(|q| {
                            rule.w[q] * param.basis(rule.z[q], i) * param.basis(rule.z[q], j)
                        })
                        .sum();
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_abs_diff_eq!(gram, expected, epsilon = 1e-10);
                }
            }
        }
    }
}

#[test]
fn test_quadrature_reproduces_moments() {
    let distributions = [
        Distribution::Normal { mu: 5.0, sigma: 2.5 },
        Distribution::Uniform { a: -1.0, b: 3.0 },
        Distribution::Exponential { mu: 4.0, beta: 0.5 },
    ];
    for dist in distributions {
        let param = RandomParameter::new(0, dist, 2).unwrap();
        let rule = param.quadrature(6).unwrap();
        let mean: f64 = rule.y.iter().zip(&rule.w).map(|(y, w)| w * y).sum();
        let var: f64 = rule
            .y
            .iter()
            .zip(&rule.w)
            .map(|(y, w)| w * (y - mean) * (y - mean))
            .sum();
        assert_abs_diff_eq!(mean, dist.mean(), epsilon = 1e-11);
        assert_abs_diff_eq!(var, dist.variance(), epsilon = 1e-10);
    }
}

#[test]
fn test_standard_physical_maps_invert() {
    let distributions = [
        Distribution::Normal { mu: 1.0, sigma: 0.1 },
        Distribution::Uniform { a: 2.0, b: 7.0 },
        Distribution::Exponential { mu: -3.0, beta: 2.0 },
    ];
    for dist in distributions {
        let param = RandomParameter::new(0, dist, 1).unwrap();
        let rule = param.quadrature(5).unwrap();
        for q in 0..rule.len() {
            assert_abs_diff_eq!(dist.to_physical(rule.z[q]), rule.y[q], epsilon = 1e-12);
            assert_abs_diff_eq!(dist.to_standard(rule.y[q]), rule.z[q], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_unsupported_order() {
    let param = RandomParameter::new(0, Distribution::Normal { mu: 0.0, sigma: 1.0 }, 2)
        .unwrap()
        .with_max_quadrature_order(10);
    assert!(param.quadrature(10).is_ok());
    assert_eq!(
        param.quadrature(11),
        Err(PchaosError::UnsupportedQuadratureOrder { order: 11, max: 10 })
    );
    assert_eq!(
        param.quadrature(0),
        Err(PchaosError::UnsupportedQuadratureOrder { order: 0, max: 10 })
    );
}

#[test]
fn test_no_order_ceiling_by_default() {
    let param = RandomParameter::new(0, Distribution::Normal { mu: 0.0, sigma: 1.0 }, 2).unwrap();
    assert_eq!(param.max_quadrature_order(), None);
    assert_eq!(param.quadrature(80).unwrap().len(), 80);
    assert!(param.quadrature(0).is_err());
}

#[test]
fn test_invalid_distributions() {
    let bad = [
        Distribution::Normal { mu: 0.0, sigma: 0.0 },
        Distribution::Normal { mu: f64::NAN, sigma: 1.0 },
        Distribution::Uniform { a: 1.0, b: 1.0 },
        Distribution::Uniform { a: 2.0, b: -1.0 },
        Distribution::Exponential { mu: 0.0, beta: -1.0 },
    ];
    for dist in bad {
        assert!(matches!(
            RandomParameter::new(0, dist, 1),
            Err(PchaosError::InvalidDistribution(_))
        ));
    }
}

#[test]
fn test_factory_assigns_sequential_ids() {
    let mut factory = ParameterFactory::new();
    let p0 = factory.create_normal(-4.0, 0.5, 3).unwrap();
    let p1 = factory.create_uniform(-5.0, 4.0, 3).unwrap();
    // A rejected distribution does not consume an id
    assert!(factory.create_exponential(6.0, 0.0, 3).is_err());
    let p2 = factory.create_exponential_named("k", 6.0, 1.0, 4).unwrap();

    assert_eq!(p0.id(), 0);
    assert_eq!(p1.id(), 1);
    assert_eq!(p2.id(), 2);
    assert_eq!(p2.name(), Some("k"));
    assert_eq!(p2.max_degree(), 4);
    assert_eq!(p0.family(), PolynomialFamily::Hermite);
    assert_eq!(p1.family(), PolynomialFamily::Legendre);
    assert_eq!(p2.family(), PolynomialFamily::Laguerre);
}

#[test]
fn test_set_id() {
    let mut param = RandomParameter::new(0, Distribution::Uniform { a: 0.0, b: 1.0 }, 1).unwrap();
    param.set_id(3);
    assert_eq!(param.id(), 3);
}

#[test]
fn test_serde_round_trip() {
    let param = RandomParameter::new(1, Distribution::Uniform { a: -1.0, b: 1.0 }, 2)
        .unwrap()
        .with_name("m");
    let text = serde_json::to_string(&param).unwrap();
    assert!(text.contains("\"family\":\"uniform\""));
    let back: RandomParameter = serde_json::from_str(&text).unwrap();
    assert_eq!(back, param);

    let text = parameter_json(r#"{"family": "normal", "mu": 5.0, "sigma": 2.5}"#, "");
    let parsed: RandomParameter = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.max_degree(), 2);
    assert_eq!(parsed.max_quadrature_order(), None);
    assert_eq!(parsed.distribution().mean(), 5.0);
}

fn parameter_json(distribution: &str, extra: &str) -> String {
    format!(
        r#"{{"id": 0, "distribution": {}, "max_degree": 2{}}}"#,
        distribution, extra
    )
}

#[test]
fn test_deserialize_rejects_invalid_parameters() {
    let bad = [
        parameter_json(r#"{"family": "normal", "mu": 0.0, "sigma": 0.0}"#, ""),
        parameter_json(r#"{"family": "uniform", "a": 3.0, "b": 1.0}"#, ""),
        parameter_json(r#"{"family": "exponential", "mu": 0.0, "beta": -2.0}"#, ""),
        parameter_json(
            r#"{"family": "normal", "mu": 0.0, "sigma": 1.0}"#,
            r#", "max_quadrature_order": 0"#,
        ),
    ];
    for text in &bad {
        assert!(
            serde_json::from_str::<RandomParameter>(text).is_err(),
            "accepted {}",
            text
        );
    }

    let good = parameter_json(r#"{"family": "normal", "mu": 0.0, "sigma": 1.0}"#, "");
    assert!(serde_json::from_str::<RandomParameter>(&good).is_ok());

    let err = serde_json::from_str::<Distribution>(r#"{"family": "normal", "mu": 0, "sigma": 0}"#)
        .unwrap_err();
    assert!(err.to_string().contains("sigma > 0"));
}
