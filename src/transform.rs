//! Transform of one link in the modified Denavit-Hartenberg convention

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Translation3, UnitQuaternion};
use crate::parameters::dh_kinematics::DhLink;

/// Homogeneous 4x4 transform for the twist angle alpha, link length a, link offset d
/// and joint angle theta. This is Rx(alpha) * Tx(a) * Rz(theta) * Tz(d).
pub fn dh_matrix(alpha: f64, a: f64, d: f64, theta: f64) -> Matrix4<f64> {
    let (st, ct) = theta.sin_cos();
    let (sa, ca) = alpha.sin_cos();
    Matrix4::new(
        ct, -st, 0.0, a,
        st * ca, ct * ca, -sa, -sa * d,
        st * sa, ct * sa, ca, ca * d,
        0.0, 0.0, 0.0, 1.0,
    )
}

/// Same transform as dh_matrix, as the rigid isometry. The rotation part stays
/// orthonormal under any number of compositions.
pub fn dh_isometry(alpha: f64, a: f64, d: f64, theta: f64) -> Isometry3<f64> {
    let (sa, ca) = alpha.sin_cos();
    Isometry3::from_parts(
        Translation3::new(a, -sa * d, ca * d),
        UnitQuaternion::from_rotation_matrix(&dh_rotation(sa, ca, theta)),
    )
}

/// Transform of the link at the given joint angle. The link's own theta constant is added.
pub fn link_transform(link: &DhLink, q: f64) -> Isometry3<f64> {
    dh_isometry(link.twist, link.length, link.offset, q + link.theta)
}

/// Rotation block of the DH transform for the precomputed sine and cosine of the twist.
pub(crate) fn dh_rotation(sin_alpha: f64, cos_alpha: f64, theta: f64) -> Rotation3<f64> {
    let (st, ct) = theta.sin_cos();
    Rotation3::from_matrix_unchecked(Matrix3::new(
        ct, -st, 0.0,
        st * cos_alpha, ct * cos_alpha, -sin_alpha,
        st * sin_alpha, ct * sin_alpha, cos_alpha,
    ))
}
