//! Default unit headers.
//!
//! Each unit starts with its header, then the rendered fragments. Headers
//! carry the imports the rendered code relies on (`deref`, `inc`,
//! `cpp_set`, `std_string`, the nose assertions, ...).

const BANNER: &str = "\
################################################
#                 WARNING!                     #
# This file has been auto-generated by stlwrap.#
#    Changes will be lost on regeneration.     #
################################################
";

const CIMPORTS: &str = "\
from libcpp.string cimport string as std_string
from libcpp.utility cimport pair
from libcpp.map cimport map as cpp_map
from libcpp.set cimport set as cpp_set
from libcpp.vector cimport vector as cpp_vector
from libcpp cimport bool as cpp_bool
from libc.stdlib cimport malloc, free
cimport numpy as np
cimport xdress_extra_types
";

/// Header of the implementation (`.pyx`) unit.
pub fn implementation(module: &str) -> String {
    format!(
        "{BANNER}\"\"\"Python wrappers for C++ standard library containers.

The classes and converters of `{module}` are generated per element type.
\"\"\"
# Cython imports
from cython.operator cimport dereference as deref
from cython.operator cimport preincrement as inc
{CIMPORTS}
# Python imports
import collections.abc

import numpy as np

np.import_array()

"
    )
}

/// Header of the interface (`.pxd`) unit.
pub fn interface(module: &str) -> String {
    format!(
        "{BANNER}\"\"\"C-level declarations for `{module}`.\"\"\"
{CIMPORTS}
"
    )
}

/// Header of the test unit.
pub fn tests(module: &str) -> String {
    format!(
        "\"\"\"Tests the part of `{module}` that is accessible from Python.\"\"\"
{BANNER}
from nose.tools import assert_equal, assert_not_equal, assert_raises, raises, \\
    assert_almost_equal, assert_true, assert_false, assert_in

from numpy.testing import assert_array_equal, assert_array_almost_equal

import numpy as np

import {module} as conv

"
    )
}
