// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Reporter`] ignoring all events.

use crate::{error::ReportError, event, Reporter};

/// [`Reporter`] ignoring all the events it handles.
///
/// Useful as the base of a wrapper whose own output is all that matters,
/// like [`Stats`] for the pure statistics format.
///
/// [`Stats`]: crate::reporter::Stats
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl Reporter for Discard {
    fn handle_event(&mut self, _: &event::Run) -> Result<(), ReportError> {
        Ok(())
    }
}
