use alloc::boxed::Box;

use crate::{BoxError, Diagnostic, DiagnosticSink, Severity, Size};

pub type SizeProvider = Box<dyn FnMut(usize) -> Result<Size, BoxError>>;
pub type CountProvider = Box<dyn FnMut() -> Result<usize, BoxError>>;
pub type PopulateCallback<W> = Box<dyn FnMut(usize, &mut W) -> Result<(), BoxError>>;

/// Calls the user's data callbacks and absorbs their failures.
///
/// Every failure becomes a [`Diagnostic`] (sink + log) and a fallback value; nothing here returns
/// an error to the engine.
pub struct DataBinder<W> {
    size: Option<SizeProvider>,
    count: Option<CountProvider>,
    populate: Option<PopulateCallback<W>>,
    sink: Option<DiagnosticSink>,
    default_item_size: Size,
}

impl<W> DataBinder<W> {
    pub(crate) fn new(default_item_size: Size) -> Self {
        Self {
            size: None,
            count: None,
            populate: None,
            sink: None,
            default_item_size,
        }
    }

    pub(crate) fn set_default_item_size(&mut self, size: Size) {
        self.default_item_size = size;
    }

    pub(crate) fn set_size_provider(&mut self, f: Option<SizeProvider>) {
        self.size = f;
    }

    pub(crate) fn set_count_provider(&mut self, f: Option<CountProvider>) {
        self.count = f;
    }

    pub(crate) fn set_populate(&mut self, f: Option<PopulateCallback<W>>) {
        self.populate = f;
    }

    pub(crate) fn set_sink(&mut self, sink: Option<DiagnosticSink>) {
        self.sink = sink;
    }

    /// Measured size of `index`, or the default size.
    pub(crate) fn item_size(&mut self, index: usize) -> Size {
        let measured = self.size.as_mut().map(|f| f(index));
        let size = match measured {
            Some(Ok(size)) => size,
            Some(Err(source)) => {
                self.report(Diagnostic::ItemSize { index, source });
                self.default_item_size
            }
            None => self.default_item_size,
        };
        if !size.is_positive() {
            self.report(Diagnostic::NonPositiveItemSize { index, size });
        }
        size
    }

    /// Current data count.
    ///
    /// Without a provider this is `pool_size` (with a warning); on provider failure the
    /// `previous` count is kept.
    pub(crate) fn item_count(&mut self, pool_size: usize, previous: usize) -> usize {
        match self.count.as_mut().map(|f| f()) {
            Some(Ok(count)) => count,
            Some(Err(source)) => {
                self.report(Diagnostic::ItemCount { source });
                previous
            }
            None => {
                self.report(Diagnostic::MissingCountProvider { pool_size });
                pool_size
            }
        }
    }

    pub(crate) fn populate(&mut self, index: usize, widget: &mut W) {
        let result = match self.populate.as_mut() {
            Some(f) => f(index, widget),
            None => return,
        };
        if let Err(source) = result {
            self.report(Diagnostic::Populate { index, source });
        }
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => {
                vwarn!(error = %diagnostic, "recycle view diagnostic");
            }
            Severity::Error => {
                verror!(error = %diagnostic, "recycle view diagnostic");
            }
        }
        if let Some(sink) = &mut self.sink {
            sink(&diagnostic);
        }
    }
}

impl<W> core::fmt::Debug for DataBinder<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataBinder")
            .field("has_size_provider", &self.size.is_some())
            .field("has_count_provider", &self.count.is_some())
            .field("has_populate", &self.populate.is_some())
            .field("default_item_size", &self.default_item_size)
            .finish_non_exhaustive()
    }
}
