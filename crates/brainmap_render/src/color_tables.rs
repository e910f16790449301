//! Built-in color lookup tables

/// Blue-black-red diverging ramp, 192 equally spaced RGB stops in [0, 1]
///
/// Low values run from blue through teal to black at the midpoint,
/// high values from black through orange to red.
pub const NEGPOS: [[f32; 3]; 192] = [
    [0.0000, 0.0000, 1.0000],
    [0.0000, 0.0000, 0.9895],
    [0.0000, 0.0000, 0.9789],
    [0.0000, 0.0000, 0.9684],
    [0.0000, 0.0000, 0.9579],
    [0.0000, 0.0000, 0.9474],
    [0.0000, 0.0000, 0.9368],
    [0.0000, 0.0000, 0.9263],
    [0.0000, 0.0000, 0.9158],
    [0.0000, 0.0000, 0.9053],
    [0.0000, 0.0000, 0.8947],
    [0.0000, 0.0000, 0.8842],
    [0.0000, 0.0000, 0.8737],
    [0.0000, 0.0000, 0.8632],
    [0.0000, 0.0000, 0.8526],
    [0.0000, 0.0000, 0.8421],
    [0.0000, 0.0000, 0.8316],
    [0.0000, 0.0000, 0.8211],
    [0.0000, 0.0000, 0.8105],
    [0.0000, 0.0000, 0.8000],
    [0.0000, 0.0000, 0.7895],
    [0.0000, 0.0000, 0.7789],
    [0.0000, 0.0000, 0.7684],
    [0.0000, 0.0000, 0.7579],
    [0.0000, 0.0000, 0.7474],
    [0.0000, 0.0000, 0.7368],
    [0.0000, 0.0000, 0.7263],
    [0.0000, 0.0000, 0.7158],
    [0.0000, 0.0000, 0.7053],
    [0.0000, 0.0000, 0.6947],
    [0.0000, 0.0000, 0.6842],
    [0.0000, 0.0000, 0.6737],
    [0.0000, 0.3316, 0.6632],
    [0.0000, 0.3263, 0.6526],
    [0.0000, 0.3211, 0.6421],
    [0.0000, 0.3158, 0.6316],
    [0.0000, 0.3105, 0.6211],
    [0.0000, 0.3053, 0.6105],
    [0.0000, 0.3000, 0.6000],
    [0.0000, 0.2947, 0.5895],
    [0.0000, 0.2895, 0.5789],
    [0.0000, 0.2842, 0.5684],
    [0.0000, 0.2789, 0.5579],
    [0.0000, 0.2737, 0.5474],
    [0.0000, 0.2684, 0.5368],
    [0.0000, 0.2632, 0.5263],
    [0.0000, 0.2579, 0.5158],
    [0.0000, 0.2526, 0.5053],
    [0.0000, 0.2474, 0.4947],
    [0.0000, 0.2421, 0.4842],
    [0.0000, 0.2368, 0.4737],
    [0.0000, 0.2316, 0.4632],
    [0.0000, 0.2263, 0.4526],
    [0.0000, 0.2211, 0.4421],
    [0.0000, 0.2158, 0.4316],
    [0.0000, 0.2105, 0.4211],
    [0.0000, 0.2053, 0.4105],
    [0.0000, 0.2000, 0.4000],
    [0.0000, 0.1947, 0.3895],
    [0.0000, 0.1895, 0.3789],
    [0.0000, 0.1842, 0.3684],
    [0.0000, 0.1789, 0.3579],
    [0.0000, 0.1737, 0.3474],
    [0.0000, 0.1684, 0.3368],
    [0.0000, 0.3263, 0.1632],
    [0.0000, 0.3158, 0.1579],
    [0.0000, 0.3053, 0.1526],
    [0.0000, 0.2947, 0.1474],
    [0.0000, 0.2842, 0.1421],
    [0.0000, 0.2737, 0.1368],
    [0.0000, 0.2632, 0.1316],
    [0.0000, 0.2526, 0.1263],
    [0.0000, 0.2421, 0.1211],
    [0.0000, 0.2316, 0.1158],
    [0.0000, 0.2211, 0.1105],
    [0.0000, 0.2105, 0.1053],
    [0.0000, 0.2000, 0.1000],
    [0.0000, 0.1895, 0.0947],
    [0.0000, 0.1789, 0.0895],
    [0.0000, 0.1684, 0.0842],
    [0.0000, 0.1579, 0.0789],
    [0.0000, 0.1474, 0.0737],
    [0.0000, 0.1368, 0.0684],
    [0.0000, 0.1263, 0.0632],
    [0.0000, 0.1158, 0.0579],
    [0.0000, 0.1053, 0.0526],
    [0.0000, 0.0947, 0.0474],
    [0.0000, 0.0842, 0.0421],
    [0.0000, 0.0737, 0.0368],
    [0.0000, 0.0632, 0.0316],
    [0.0000, 0.0526, 0.0263],
    [0.0000, 0.0421, 0.0211],
    [0.0000, 0.0316, 0.0158],
    [0.0000, 0.0211, 0.0105],
    [0.0000, 0.0105, 0.0053],
    [0.0000, 0.0000, 0.0000],
    [0.0000, 0.0000, 0.0000],
    [0.0053, 0.0105, 0.0000],
    [0.0105, 0.0211, 0.0000],
    [0.0158, 0.0316, 0.0000],
    [0.0211, 0.0421, 0.0000],
    [0.0263, 0.0526, 0.0000],
    [0.0316, 0.0632, 0.0000],
    [0.0368, 0.0737, 0.0000],
    [0.0421, 0.0842, 0.0000],
    [0.0474, 0.0947, 0.0000],
    [0.0526, 0.1053, 0.0000],
    [0.0579, 0.1158, 0.0000],
    [0.0632, 0.1263, 0.0000],
    [0.0684, 0.1368, 0.0000],
    [0.0737, 0.1474, 0.0000],
    [0.0789, 0.1579, 0.0000],
    [0.0842, 0.1684, 0.0000],
    [0.0895, 0.1789, 0.0000],
    [0.0947, 0.1895, 0.0000],
    [0.1000, 0.2000, 0.0000],
    [0.1053, 0.2105, 0.0000],
    [0.1105, 0.2211, 0.0000],
    [0.1158, 0.2316, 0.0000],
    [0.1211, 0.2421, 0.0000],
    [0.1263, 0.2526, 0.0000],
    [0.1316, 0.2632, 0.0000],
    [0.1368, 0.2737, 0.0000],
    [0.1421, 0.2842, 0.0000],
    [0.1474, 0.2947, 0.0000],
    [0.1526, 0.3053, 0.0000],
    [0.1579, 0.3158, 0.0000],
    [0.1632, 0.3263, 0.0000],
    [0.3368, 0.1684, 0.0000],
    [0.3474, 0.1737, 0.0000],
    [0.3579, 0.1789, 0.0000],
    [0.3684, 0.1842, 0.0000],
    [0.3789, 0.1895, 0.0000],
    [0.3895, 0.1947, 0.0000],
    [0.4000, 0.2000, 0.0000],
    [0.4105, 0.2053, 0.0000],
    [0.4211, 0.2105, 0.0000],
    [0.4316, 0.2158, 0.0000],
    [0.4421, 0.2211, 0.0000],
    [0.4526, 0.2263, 0.0000],
    [0.4632, 0.2316, 0.0000],
    [0.4737, 0.2368, 0.0000],
    [0.4842, 0.2421, 0.0000],
    [0.4947, 0.2474, 0.0000],
    [0.5053, 0.2526, 0.0000],
    [0.5158, 0.2579, 0.0000],
    [0.5263, 0.2632, 0.0000],
    [0.5368, 0.2684, 0.0000],
    [0.5474, 0.2737, 0.0000],
    [0.5579, 0.2789, 0.0000],
    [0.5684, 0.2842, 0.0000],
    [0.5789, 0.2895, 0.0000],
    [0.5895, 0.2947, 0.0000],
    [0.6000, 0.3000, 0.0000],
    [0.6105, 0.3053, 0.0000],
    [0.6211, 0.3105, 0.0000],
    [0.6316, 0.3158, 0.0000],
    [0.6421, 0.3211, 0.0000],
    [0.6526, 0.3263, 0.0000],
    [0.6632, 0.3316, 0.0000],
    [0.6737, 0.0000, 0.0000],
    [0.6842, 0.0000, 0.0000],
    [0.6947, 0.0000, 0.0000],
    [0.7053, 0.0000, 0.0000],
    [0.7158, 0.0000, 0.0000],
    [0.7263, 0.0000, 0.0000],
    [0.7368, 0.0000, 0.0000],
    [0.7474, 0.0000, 0.0000],
    [0.7579, 0.0000, 0.0000],
    [0.7684, 0.0000, 0.0000],
    [0.7789, 0.0000, 0.0000],
    [0.7895, 0.0000, 0.0000],
    [0.8000, 0.0000, 0.0000],
    [0.8105, 0.0000, 0.0000],
    [0.8211, 0.0000, 0.0000],
    [0.8316, 0.0000, 0.0000],
    [0.8421, 0.0000, 0.0000],
    [0.8526, 0.0000, 0.0000],
    [0.8632, 0.0000, 0.0000],
    [0.8737, 0.0000, 0.0000],
    [0.8842, 0.0000, 0.0000],
    [0.8947, 0.0000, 0.0000],
    [0.9053, 0.0000, 0.0000],
    [0.9158, 0.0000, 0.0000],
    [0.9263, 0.0000, 0.0000],
    [0.9368, 0.0000, 0.0000],
    [0.9474, 0.0000, 0.0000],
    [0.9579, 0.0000, 0.0000],
    [0.9684, 0.0000, 0.0000],
    [0.9789, 0.0000, 0.0000],
    [0.9895, 0.0000, 0.0000],
    [1.0000, 0.0000, 0.0000],
];
