/*!

This is the long-form manual for `snow_scheduling` and `snowsched`.

## Expected data layout

The scheduler works on two sub-tables of one data source.

### `Responses`

One row per availability answer, with a header row naming the fields:

```text
Name,Days,Replacement
Leader Alice,"Monday, Wednesday",No
Varsity Bob,Monday,No
```

- `Name` is the identity key. Leading and trailing whitespace is
  removed; matching against the records is case-insensitive.
- `Days` is a comma-separated list of day names. Each token is trimmed
  but NOT re-cased: an answer of `monday` will not count for `Monday`.
- `Replacement` is an acknowledgment checkbox from the signup form. It
  is dropped on load and plays no role in scheduling.

### `Records`

One row per known person:

```text
Name,Completed,Experience,Position
Leader Alice,5,Varsity,Leader
Varsity Bob,2,Varsity,Member
```

- `Completed` is the non-negative number of removals already done. It
  drives the sort order: fewer removals means earlier pick.
- `Experience` is `Varsity`, `Novice`, or any other label. Anything
  that is not exactly `Varsity` counts against the novice cap.
- `Position` is `Leader`, `Member`, or any other label. A team needs
  exactly one `Leader` entry; extra leaders are never picked as
  regular members.

## Selection rules

For a requested day, the pool is everyone available that day with a
matching record, sorted ascending by `Completed` (ties keep response
order). The team is the first leader from the pool plus, in pool
order, every varsity member and up to three novices, capped at six
people total. See [`crate::TeamRules`] to change the caps.

## Reconciliation

Before any team is built, the respondent list should be checked with
[`crate::find_duplicates`] and [`crate::find_missing`]. Both return
findings as data; deciding whether a finding is fatal is up to the
caller. The `snowsched` command treats any finding as fatal and exits
with status 1.

*/
