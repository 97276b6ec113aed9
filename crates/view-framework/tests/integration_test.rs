use async_trait::async_trait;
use tokio::sync::oneshot;
use view_framework::mock::MockEndpoint;
use view_framework::{
    form_values, AsyncPhase, Column, EndpointData, EndpointError, FormDraft, ListQuery, Page,
    QueryEdit, RowRenderer, Settled, TableModel, TablePresenter, View, ViewActor, ViewError,
};

type NamesEndpoint = MockEndpoint<ListQuery, Page<String>>;

struct NameRow;

impl RowRenderer<String> for NameRow {
    type Row = String;

    fn columns(&self) -> Vec<Column> {
        vec![Column::new("name", "Name")]
    }

    fn render_row(&self, item: &String) -> String {
        item.clone()
    }
}

struct NamesView {
    source: EndpointData<NamesEndpoint>,
    query: ListQuery,
    presenter: TablePresenter<NameRow>,
}

#[derive(Debug)]
enum NamesEvent {
    Edit(QueryEdit),
    Reload,
}

#[derive(Debug, Clone, PartialEq)]
enum NamesSnapshot {
    Loading,
    Failed(String),
    Ready(TableModel<String>),
}

impl NamesView {
    fn new(endpoint: NamesEndpoint) -> Self {
        Self {
            source: EndpointData::new(endpoint),
            query: ListQuery::default(),
            presenter: TablePresenter::new(NameRow),
        }
    }
}

#[async_trait]
impl View for NamesView {
    type Event = NamesEvent;
    type Snapshot = NamesSnapshot;
    type Context = ();

    async fn on_mount(&mut self, _ctx: &()) -> Result<(), ViewError> {
        self.source.fetch(self.query.clone());
        Ok(())
    }

    async fn handle_event(&mut self, event: NamesEvent, _ctx: &()) -> Result<(), ViewError> {
        match event {
            NamesEvent::Edit(edit) => {
                let total = self.source.value().map(Page::total).unwrap_or(0);
                if let Some(query) = self.query.apply(&edit, total) {
                    self.query = query.clone();
                    self.source.set_params(query);
                }
            }
            NamesEvent::Reload => {
                self.source.reload();
            }
        }
        Ok(())
    }

    fn has_pending(&self) -> bool {
        self.source.has_pending()
    }

    async fn settle(&mut self, _ctx: &()) -> bool {
        matches!(self.source.next_completion().await, Some(Settled::Applied(_)))
    }

    fn snapshot(&self, _ctx: &()) -> NamesSnapshot {
        match (self.source.phase(), self.source.value(), self.source.error()) {
            (_, _, Some(err)) => NamesSnapshot::Failed(format!("Error: {err}")),
            (_, Some(page), None) => NamesSnapshot::Ready(self.presenter.render(page, &self.query)),
            _ => NamesSnapshot::Loading,
        }
    }

    fn on_unmount(&mut self) {
        self.source.unmount();
    }
}

fn names(items: &[&str]) -> Page<String> {
    let items: Vec<String> = items.iter().map(|s| s.to_string()).collect();
    let total = items.len();
    Page::new(items, total)
}

#[tokio::test]
async fn test_view_actor_lifecycle() {
    let mock = NamesEndpoint::new("names.list");
    mock.expect(ListQuery::default()).return_ok(names(&["abc", "xyz"]));

    let (actor, handle) = ViewActor::new(NamesView::new(mock.clone()), 8);
    let task = tokio::spawn(actor.run(()));

    let NamesSnapshot::Ready(table) = handle.settled().await.unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(table.rows, vec!["abc".to_string(), "xyz".to_string()]);
    assert_eq!(table.total, 2);

    handle.unmount().await.unwrap();
    task.await.unwrap();

    let err = handle.snapshot().await.unwrap_err();
    assert_eq!(err, ViewError::ViewClosed);
    mock.verify();
}

#[tokio::test]
async fn test_filter_refetches_from_first_page() {
    let mock = NamesEndpoint::new("names.list");
    mock.expect(ListQuery::default()).return_ok(names(&["abc", "xyz"]));
    let filtered = ListQuery::default().with_filter("abc");
    mock.expect(filtered.clone()).return_ok(names(&["abc"]));

    let (actor, handle) = ViewActor::new(NamesView::new(mock.clone()), 8);
    tokio::spawn(actor.run(()));
    handle.settled().await.unwrap();

    handle
        .dispatch(NamesEvent::Edit(QueryEdit::Filter("abc".into())))
        .await
        .unwrap();
    let NamesSnapshot::Ready(table) = handle.settled().await.unwrap() else {
        panic!("expected a table");
    };

    assert_eq!(table.rows, vec!["abc".to_string()]);
    assert_eq!(table.query.offset, 0);
    assert_eq!(table.query.filter_text, "abc");
    assert_eq!(mock.calls(), vec![ListQuery::default(), filtered]);
    mock.verify();
}

#[tokio::test]
async fn test_fetch_failure_replaces_body() {
    let mock = NamesEndpoint::new("names.list");
    mock.expect_any().return_err(EndpointError::Http {
        status: 500,
        message: "internal".into(),
    });

    let (actor, handle) = ViewActor::new(NamesView::new(mock.clone()), 8);
    tokio::spawn(actor.run(()));

    let snapshot = handle.settled().await.unwrap();
    assert_eq!(
        snapshot,
        NamesSnapshot::Failed("Error: Fetch failed: HTTP 500: internal".into())
    );
}

#[tokio::test]
async fn test_slow_first_response_is_discarded() {
    let mock = NamesEndpoint::new("names.list");
    let first = ListQuery::default().with_filter("a");
    let second = ListQuery::default().with_filter("ab");
    let (release_first, gate) = oneshot::channel();
    mock.expect(first.clone()).return_ok_after(names(&["a1", "a2"]), gate);
    mock.expect(second.clone()).return_ok(names(&["ab1"]));

    let mut source = EndpointData::new(mock.clone());
    source.fetch(first);
    source.fetch(second);
    assert_eq!(source.ticket(), 2);

    assert_eq!(
        source.next_completion().await,
        Some(Settled::Applied(AsyncPhase::Resolved))
    );
    release_first.send(()).unwrap();
    assert_eq!(
        source.next_completion().await,
        Some(Settled::Stale { ticket: 1, current: 2 })
    );

    assert_eq!(source.value(), Some(&names(&["ab1"])));
    assert!(!source.has_pending());
    mock.verify();
}

#[tokio::test]
async fn test_unmount_during_fetch_is_quiet() {
    let mock = NamesEndpoint::new("names.list");
    let (release, gate) = oneshot::channel();
    mock.expect_any().return_ok_after(names(&["late"]), gate);

    let (actor, handle) = ViewActor::new(NamesView::new(mock.clone()), 8);
    let task = tokio::spawn(actor.run(()));

    assert_eq!(handle.snapshot().await.unwrap(), NamesSnapshot::Loading);
    handle.unmount().await.unwrap();
    task.await.unwrap();

    // The fetch task was aborted; releasing the gate reaches nobody.
    let _ = release.send(());
    assert!(handle.dispatch(NamesEvent::Reload).await.is_err());
}

#[tokio::test]
async fn test_dropping_every_handle_stops_the_view() {
    let mock = NamesEndpoint::new("names.list");
    mock.expect_any().return_ok(names(&[]));

    let (actor, handle) = ViewActor::new(NamesView::new(mock), 8);
    let task = tokio::spawn(actor.run(()));
    handle.settled().await.unwrap();
    drop(handle);

    task.await.unwrap();
}

form_values! {
    pub struct TitleForm {
        pub name: String,
    }
}

#[test]
fn test_reset_restores_fetched_snapshot() {
    let mut draft = FormDraft::new(TitleForm { name: "A".into() });
    draft.handle(TitleFormField::Name, "B").unwrap();
    assert_eq!(draft.values().name, "B");
    assert!(draft.has_unsaved_changes());

    draft.reset();
    assert_eq!(draft.values(), &TitleForm { name: "A".into() });
    assert!(!draft.has_unsaved_changes());
}
