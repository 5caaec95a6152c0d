use float_eq::assert_float_eq;
use geodetic::prelude::*;
use geodetic::sphere::great_circle_distance;
use geodetic::MAX_ITERATIONS;

// Difference between two azimuths, folded into [0, 180]
fn azimuth_difference(a: f64, b: f64) -> f64 {
    ((a - b + 540.).rem_euclid(360.) - 180.).abs()
}

#[test]
fn sao_paulo_rio() -> Result<(), Error> {
    let ellps = Ellipsoid::named("GRS80")?;
    let sao_paulo = Coor3D::geo(-23.5505, -46.6333, 0.);
    let rio = Coor3D::geo(-22.9068, -43.1729, 0.);

    let d = ellps.geodesic_inv(&sao_paulo, &rio)?.converged()?;
    assert_float_eq!(d.distance, 361_260.861_148, abs <= 1e-3);
    assert_float_eq!(d.azimuth12, 79.305_445_859_417, abs <= 1e-8);
    assert_float_eq!(d.azimuth21, 257.940_285_011_683, abs <= 1e-8);
    assert!(!d.equatorial);

    // The strict variant agrees
    assert_eq!(ellps.distance(&sao_paulo, &rio)?, d.distance);

    // ...and back again
    let b = ellps.geodesic_fwd(&sao_paulo, d.azimuth12, d.distance)?.converged()?;
    assert_float_eq!(b.latitude, rio.latitude(), abs <= 1e-9);
    assert_float_eq!(b.longitude, rio.longitude(), abs <= 1e-9);
    assert_float_eq!(b.azimuth21, d.azimuth21, abs <= 1e-9);
    Ok(())
}

#[test]
fn round_trips() -> Result<(), Error> {
    let ellps = Ellipsoid::named("GRS80")?;
    for latitude in [-60., -35., -0.5, 0., 20., 45., 60.] {
        for longitude in [-100., 0., 100.] {
            let origin = Coor3D::geo(latitude, longitude, 0.);
            for k in 0..8 {
                let azimuth = 10. + 45. * k as f64;
                for distance in [1_000., 150_000., 2_000_000.] {
                    let b = ellps.geodesic_fwd(&origin, azimuth, distance)?.converged()?;
                    assert!((0. ..360.).contains(&b.azimuth21));
                    let destination = b.destination();

                    let d = ellps.geodesic_inv(&origin, &destination)?.converged()?;
                    assert!((0. ..360.).contains(&d.azimuth12));
                    assert!((0. ..360.).contains(&d.azimuth21));
                    assert_float_eq!(d.distance, distance, abs <= 1e-4);
                    assert!(azimuth_difference(d.azimuth12, azimuth) < 1e-8);
                    assert!(azimuth_difference(d.azimuth21, b.azimuth21) < 1e-8);

                    // Inverse, then direct, recovers the destination
                    let r = ellps.geodesic_fwd(&origin, d.azimuth12, d.distance)?;
                    assert_float_eq!(r.latitude, destination.latitude(), abs <= 1e-8);
                    assert_float_eq!(r.longitude, destination.longitude(), abs <= 1e-8);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn symmetry() -> Result<(), Error> {
    let ellps = Ellipsoid::named("intl")?;
    let points = [
        Coor3D::geo(-23.5505, -46.6333, 0.),
        Coor3D::geo(-15.7939, -47.8828, 0.),
        Coor3D::geo(55., 12., 0.),
        Coor3D::geo(-33.9249, 18.4241, 0.),
        Coor3D::geo(35.6762, 139.6503, 0.),
    ];

    for p in &points {
        for q in &points {
            if p == q {
                continue;
            }
            let pq = ellps.geodesic_inv(p, q)?.converged()?;
            let qp = ellps.geodesic_inv(q, p)?.converged()?;
            assert_float_eq!(pq.distance, qp.distance, abs <= 1e-6);
            assert!(azimuth_difference(pq.azimuth12, qp.azimuth21) < 1e-8);
            assert!(azimuth_difference(pq.azimuth21, qp.azimuth12) < 1e-8);
        }
    }
    Ok(())
}

#[test]
fn zero_distance() -> Result<(), Error> {
    let ellps = Ellipsoid::named("SAD69")?;
    let origin = Coor3D::geo(-23.5505, -46.6333, 0.);
    for azimuth in [0., 33., 90., 181., 359.] {
        let b = ellps.geodesic_fwd(&origin, azimuth, 0.)?.converged()?;
        assert_float_eq!(b.latitude, origin.latitude(), abs <= 1e-12);
        assert_float_eq!(b.longitude, origin.longitude(), abs <= 1e-12);
        let reverse = (azimuth + 180.).rem_euclid(360.);
        assert!(azimuth_difference(b.azimuth21, reverse) < 1e-12);
    }
    Ok(())
}

#[test]
fn sphere() -> Result<(), Error> {
    let radius = 6_371_000.;
    let sphere = Ellipsoid::new(radius, 0.)?;
    let p = Coor3D::geo(10., 20., 0.);
    let q = Coor3D::geo(-30., 100., 0.);

    // With zero flattening, the geodesic is the great circle
    let d = sphere.geodesic_inv(&p, &q)?.converged()?;
    assert_float_eq!(d.distance, great_circle_distance(&p, &q, radius), abs <= 1e-6);
    assert_float_eq!(d.distance, 9_616_915.812_414, abs <= 1e-4);
    assert_float_eq!(d.azimuth12, 121.298_309_882_18, abs <= 1e-8);
    assert_float_eq!(d.azimuth21, 283.670_203_134_198, abs <= 1e-8);

    let b = sphere.geodesic_fwd(&p, d.azimuth12, d.distance)?.converged()?;
    assert_float_eq!(b.destination().0, q.0, abs_all <= 1e-9);
    Ok(())
}

#[test]
fn near_antipodal() -> Result<(), Error> {
    let ellps = Ellipsoid::named("GRS80")?;
    let origin = Coor3D::geo(0., 0., 0.);

    // Reported as a capped, but finite, solution
    let d = ellps.geodesic_inv(&origin, &Coor3D::geo(0.5, 179.7, 0.))?;
    assert_eq!(d.convergence, Convergence::IterationCap);
    assert_eq!(d.iterations, MAX_ITERATIONS);
    assert!(d.distance.is_finite());
    assert!(matches!(
        ellps.distance(&origin, &Coor3D::geo(0.5, 179.7, 0.)),
        Err(Error::Convergence(_))
    ));

    // Exactly antipodal points have no unique geodesic
    let antipodes = [
        (Coor3D::geo(0., 0., 0.), Coor3D::geo(0., 180., 0.)),
        (Coor3D::geo(90., 0., 0.), Coor3D::geo(-90., 0., 0.)),
        (Coor3D::geo(89.99, 0., 0.), Coor3D::geo(-89.99, 180., 0.)),
    ];
    for (p, q) in &antipodes {
        assert!(matches!(
            ellps.geodesic_inv(p, q),
            Err(Error::SingularGeometry(_))
        ));
    }
    Ok(())
}

#[test]
fn shared_between_threads() -> Result<(), Error> {
    let ellps = Ellipsoid::named("GRS80")?;
    let cph = Coor3D::geo(55., 12., 0.);
    let expected = ellps.geodesic_inv(&cph, &Coor3D::geo(49., 2., 0.))?;

    let solutions = std::thread::scope(|s| {
        let handles = (0..4)
            .map(|_| s.spawn(|| ellps.geodesic_inv(&cph, &Coor3D::geo(49., 2., 0.))))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .map_err(|_| Error::Syntax("thread panicked".to_string()))
                    .and_then(|solution| solution)
            })
            .collect::<Result<Vec<_>, Error>>()
    })?;

    assert_eq!(solutions.len(), 4);
    for d in solutions {
        assert_eq!(d, expected);
    }
    Ok(())
}

#[test]
fn geocart_round_trip() -> Result<(), Error> {
    let ellps = Ellipsoid::named("GRS80")?;
    let sao_paulo = Coor3D::geo(-23.5505, -46.6333, 760.);
    let cart = ellps.cartesian(&sao_paulo);
    let back = ellps.geographic(&cart);
    assert_float_eq!(back.latitude(), sao_paulo.latitude(), abs <= 1e-12);
    assert_float_eq!(back.longitude(), sao_paulo.longitude(), abs <= 1e-12);
    assert_float_eq!(back.height(), sao_paulo.height(), abs <= 1e-8);
    Ok(())
}
