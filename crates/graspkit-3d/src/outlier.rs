use kiddo::immutable::float::kdtree::ImmutableKdTree;

use crate::pointcloud::PointCloud;

/// Remove statistical outliers from a point cloud.
///
/// For every point the mean distance to its `nb_neighbors` nearest neighbors
/// is computed; points whose statistic exceeds the global mean by more than
/// `std_ratio` standard deviations are discarded. Colors and normals are
/// filtered alongside the points.
///
/// # Arguments
///
/// * `cloud` - The input point cloud.
/// * `nb_neighbors` - The neighborhood size of the distance statistic.
/// * `std_ratio` - The rejection threshold in standard deviations.
///
/// # Returns
///
/// The filtered point cloud.
pub fn remove_statistical_outliers(
    cloud: &PointCloud,
    nb_neighbors: usize,
    std_ratio: f64,
) -> PointCloud {
    if cloud.len() <= 1 || nb_neighbors == 0 {
        return cloud.clone();
    }

    let points = cloud.points();
    let kdtree: ImmutableKdTree<f64, u32, 3, 32> = ImmutableKdTree::new_from_slice(points);

    // query one extra neighbor so the point itself can be skipped
    let qty = (nb_neighbors + 1).min(points.len());

    let mean_distances = points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let neighbors = kdtree
                .nearest_n::<kiddo::SquaredEuclidean>(point, std::num::NonZero::new(qty).unwrap());
            let distances = neighbors
                .iter()
                .filter(|nn| nn.item as usize != i)
                .map(|nn| nn.distance.sqrt())
                .collect::<Vec<_>>();
            if distances.is_empty() {
                0.0
            } else {
                distances.iter().sum::<f64>() / distances.len() as f64
            }
        })
        .collect::<Vec<_>>();

    let mean = mean_distances.iter().sum::<f64>() / mean_distances.len() as f64;
    let variance = mean_distances
        .iter()
        .map(|d| (d - mean).powi(2))
        .sum::<f64>()
        / mean_distances.len() as f64;
    let threshold = mean + std_ratio * variance.sqrt();

    let keep = mean_distances
        .iter()
        .map(|&d| d <= threshold)
        .collect::<Vec<_>>();

    let filter_points = points
        .iter()
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|(p, _)| *p)
        .collect::<Vec<_>>();
    let filter_colors = cloud.colors().map(|colors| {
        colors
            .iter()
            .zip(keep.iter())
            .filter(|(_, &k)| k)
            .map(|(c, _)| *c)
            .collect::<Vec<_>>()
    });
    let filter_normals = cloud.normals().map(|normals| {
        normals
            .iter()
            .zip(keep.iter())
            .filter(|(_, &k)| k)
            .map(|(n, _)| *n)
            .collect::<Vec<_>>()
    });

    log::debug!(
        "statistical outlier removal kept {} of {} points",
        filter_points.len(),
        points.len()
    );

    PointCloud::new(filter_points, filter_colors, filter_normals)
}
