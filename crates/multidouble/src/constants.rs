// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Embedded high-precision constants.
//!
//! Every value is the canonical split of the exact constant (nearest double,
//! then nearest double to the remainder, and so on), generated offline by
//! `scripts/generate_constants.py` at several thousand bits of precision.

use crate::{Oct, Quad};
use multidouble_core::num::constants::MathConstants;

impl MathConstants for Quad {
    const PI: Self = Quad::from_raw(3.141592653589793, 1.2246467991473532e-16);
    const FRAC_PI_2: Self = Quad::from_raw(1.5707963267948966, 6.123233995736766e-17);
    const FRAC_PI_4: Self = Quad::from_raw(0.7853981633974483, 3.061616997868383e-17);
    const TAU: Self = Quad::from_raw(6.283185307179586, 2.4492935982947064e-16);
    const E: Self = Quad::from_raw(2.718281828459045, 1.4456468917292502e-16);
    const LN_2: Self = Quad::from_raw(0.6931471805599453, 2.3190468138462996e-17);
    const LN_10: Self = Quad::from_raw(2.302585092994046, -2.1707562233822494e-16);
    const LOG2_E: Self = Quad::from_raw(1.4426950408889634, 2.0355273740931033e-17);
    const LOG10_E: Self = Quad::from_raw(0.4342944819032518, 1.098319650216765e-17);
    const SQRT_2: Self = Quad::from_raw(1.4142135623730951, -9.667293313452913e-17);
    const FRAC_1_SQRT_2: Self = Quad::from_raw(0.7071067811865476, -4.833646656726457e-17);
}

impl MathConstants for Oct {
    const PI: Self = Oct::from_raw([
        3.141592653589793,
        1.2246467991473532e-16,
        -2.9947698097183397e-33,
        1.1124542208633653e-49,
    ]);
    const FRAC_PI_2: Self = Oct::from_raw([
        1.5707963267948966,
        6.123233995736766e-17,
        -1.4973849048591698e-33,
        5.562271104316826e-50,
    ]);
    const FRAC_PI_4: Self = Oct::from_raw([
        0.7853981633974483,
        3.061616997868383e-17,
        -7.486924524295849e-34,
        2.781135552158413e-50,
    ]);
    const TAU: Self = Oct::from_raw([
        6.283185307179586,
        2.4492935982947064e-16,
        -5.989539619436679e-33,
        2.2249084417267306e-49,
    ]);
    const E: Self = Oct::from_raw([
        2.718281828459045,
        1.4456468917292502e-16,
        -2.1277171080381768e-33,
        1.5156301598412191e-49,
    ]);
    const LN_2: Self = Oct::from_raw([
        0.6931471805599453,
        2.3190468138462996e-17,
        5.707708438416212e-34,
        -3.5824322106018114e-50,
    ]);
    const LN_10: Self = Oct::from_raw([
        2.302585092994046,
        -2.1707562233822494e-16,
        -9.984262454465777e-33,
        -4.023357454450206e-49,
    ]);
    const LOG2_E: Self = Oct::from_raw([
        1.4426950408889634,
        2.0355273740931033e-17,
        -1.0614659956117258e-33,
        -1.3836716780181402e-50,
    ]);
    const LOG10_E: Self = Oct::from_raw([
        0.4342944819032518,
        1.098319650216765e-17,
        3.717181233110959e-34,
        7.734484346504299e-51,
    ]);
    const SQRT_2: Self = Oct::from_raw([
        1.4142135623730951,
        -9.667293313452913e-17,
        4.1386753086994136e-33,
        4.935546991468351e-50,
    ]);
    const FRAC_1_SQRT_2: Self = Oct::from_raw([
        0.7071067811865476,
        -4.833646656726457e-17,
        2.0693376543497068e-33,
        2.4677734957341755e-50,
    ]);
}

/// `1 / k!` for `k = 0..=30`.
pub(crate) const INV_FACTORIALS: [Quad; 31] = [
    Quad::from_raw(1.0, 0.0),
    Quad::from_raw(1.0, 0.0),
    Quad::from_raw(0.5, 0.0),
    Quad::from_raw(0.16666666666666666, 9.25185853854297e-18),
    Quad::from_raw(0.041666666666666664, 2.3129646346357427e-18),
    Quad::from_raw(0.008333333333333333, 1.1564823173178714e-19),
    Quad::from_raw(0.001388888888888889, -5.300543954373577e-20),
    Quad::from_raw(0.0001984126984126984, 1.7209558293420705e-22),
    Quad::from_raw(2.48015873015873e-05, 2.1511947866775882e-23),
    Quad::from_raw(2.7557319223985893e-06, -1.858393274046472e-22),
    Quad::from_raw(2.755731922398589e-07, 2.3767714622250297e-23),
    Quad::from_raw(2.505210838544172e-08, -1.448814070935912e-24),
    Quad::from_raw(2.08767569878681e-09, -1.20734505911326e-25),
    Quad::from_raw(1.6059043836821613e-10, 1.2585294588752098e-26),
    Quad::from_raw(1.1470745597729725e-11, 2.0655512752830745e-28),
    Quad::from_raw(7.647163731819816e-13, 7.03872877733453e-30),
    Quad::from_raw(4.779477332387385e-14, 4.399205485834081e-31),
    Quad::from_raw(2.8114572543455206e-15, 1.6508842730861433e-31),
    Quad::from_raw(1.5619206968586225e-16, 1.1910679660273754e-32),
    Quad::from_raw(8.22063524662433e-18, 2.2141894119604265e-34),
    Quad::from_raw(4.110317623312165e-19, 1.4412973378659527e-36),
    Quad::from_raw(1.9572941063391263e-20, -1.3643503830087908e-36),
    Quad::from_raw(8.896791392450574e-22, -7.911402614872376e-38),
    Quad::from_raw(3.868170170630684e-23, -8.843177655482344e-40),
    Quad::from_raw(1.6117375710961184e-24, -3.6846573564509766e-41),
    Quad::from_raw(6.446950284384474e-26, -1.9330404233703465e-42),
    Quad::from_raw(2.4795962632247976e-27, -1.2953730964765229e-43),
    Quad::from_raw(9.183689863795546e-29, 1.4303150396787322e-45),
    Quad::from_raw(3.279889237069838e-30, 1.5117542744029879e-46),
    Quad::from_raw(1.1309962886447716e-31, 1.0498015412959506e-47),
    Quad::from_raw(3.7699876288159054e-33, 2.5870347832750324e-49),
];

/// `1 / (2k + 1)` for `k = 0..16`.
pub(crate) const ODD_RECIPROCALS: [Quad; 16] = [
    Quad::from_raw(1.0, 0.0),
    Quad::from_raw(0.3333333333333333, 1.850371707708594e-17),
    Quad::from_raw(0.2, -1.1102230246251566e-17),
    Quad::from_raw(0.14285714285714285, 7.93016446160826e-18),
    Quad::from_raw(0.1111111111111111, 6.1679056923619804e-18),
    Quad::from_raw(0.09090909090909091, -2.523234146875356e-18),
    Quad::from_raw(0.07692307692307693, -4.270088556250602e-18),
    Quad::from_raw(0.06666666666666667, 9.251858538542971e-19),
    Quad::from_raw(0.058823529411764705, 8.163404592832033e-19),
    Quad::from_raw(0.05263157894736842, 2.921639538487254e-18),
    Quad::from_raw(0.047619047619047616, 2.64338815386942e-18),
    Quad::from_raw(0.043478260869565216, 1.206764157201257e-18),
    Quad::from_raw(0.04, -8.326672684688674e-19),
    Quad::from_raw(0.037037037037037035, 2.05596856412066e-18),
    Quad::from_raw(0.034482758620689655, 4.785444071660157e-19),
    Quad::from_raw(0.03225806451612903, 8.953411488912552e-19),
];

/// `3π/4`.
pub(crate) const FRAC_3_PI_4: Quad = Quad::from_raw(2.356194490192345, 9.184850993605148e-17);
